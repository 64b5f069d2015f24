use anyhow::{Context, Result};
use particle_shared::FrameSnapshot;
use std::io::Write;

/// Receives one snapshot per tick.
pub trait FrameSink {
    fn render(&mut self, frame: &FrameSnapshot) -> Result<()>;

    /// Called once after the last frame.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: FrameSink + ?Sized> FrameSink for Box<S> {
    fn render(&mut self, frame: &FrameSnapshot) -> Result<()> {
        (**self).render(frame)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

/// Headless sink that only counts frames
#[derive(Debug, Default)]
pub struct NullSink {
    frames: u64,
}

impl NullSink {
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl FrameSink for NullSink {
    fn render(&mut self, _frame: &FrameSnapshot) -> Result<()> {
        self.frames += 1;
        Ok(())
    }
}

/// Writes each snapshot as one line of JSON
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FrameSink for JsonLinesSink<W> {
    fn render(&mut self, frame: &FrameSnapshot) -> Result<()> {
        serde_json::to_writer(&mut self.writer, frame).context("Failed to encode frame")?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Draws the box outline and particles as an ASCII canvas.
///
/// Rows run top to bottom from `ymax`, columns left to right from `xmin`.
/// A cell holding more than one particle is drawn with `@`.
pub struct TerminalRenderer<W: Write> {
    writer: W,
    columns: usize,
    rows: usize,
    clear_screen: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(writer: W, columns: usize, rows: usize) -> Self {
        Self {
            writer,
            columns: columns.max(3),
            rows: rows.max(3),
            clear_screen: true,
        }
    }

    /// Disable the ANSI clear sequence written before each frame.
    pub fn without_clear(mut self) -> Self {
        self.clear_screen = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Lays out one frame without writing it.
    pub fn draw(&self, frame: &FrameSnapshot) -> Vec<String> {
        let (columns, rows) = (self.columns, self.rows);
        let mut canvas = vec![vec![' '; columns]; rows];

        for (r, row) in canvas.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                let vertical_edge = c == 0 || c == columns - 1;
                let horizontal_edge = r == 0 || r == rows - 1;
                *cell = match (horizontal_edge, vertical_edge) {
                    (true, true) => '+',
                    (true, false) => '-',
                    (false, true) => '|',
                    (false, false) => ' ',
                };
            }
        }

        let outline = frame.outline;
        // Interior cells only, so particles never overwrite the border.
        let inner_columns = (columns - 2) as f64;
        let inner_rows = (rows - 2) as f64;
        for p in &frame.positions {
            let u = ((p.x - outline.xmin) / outline.width()).clamp(0.0, 1.0);
            let v = ((outline.ymax - p.y) / outline.height()).clamp(0.0, 1.0);
            let c = 1 + ((u * inner_columns) as usize).min(columns - 3);
            let r = 1 + ((v * inner_rows) as usize).min(rows - 3);

            let cell = &mut canvas[r][c];
            *cell = if *cell == ' ' { 'o' } else { '@' };
        }

        canvas
            .into_iter()
            .map(|row| row.into_iter().collect())
            .collect()
    }
}

impl<W: Write> FrameSink for TerminalRenderer<W> {
    fn render(&mut self, frame: &FrameSnapshot) -> Result<()> {
        let lines = self.draw(frame);

        if self.clear_screen {
            write!(self.writer, "\x1b[H\x1b[2J")?;
        }
        for line in &lines {
            writeln!(self.writer, "{}", line)?;
        }
        writeln!(
            self.writer,
            "frame {:>4}  t = {:.2}s  particles = {}",
            frame.frame,
            frame.time_elapsed,
            frame.positions.len()
        )?;
        self.writer.flush()?;
        Ok(())
    }
}
