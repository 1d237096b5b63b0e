use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::terminal::{self, Clear, ClearType};
use gs_core::error::CoreError;
use gs_core::frame::AsciiFrame;
use gs_core::traits::Renderer;

/// Taille de repli quand le terminal ne répond pas.
pub const FALLBACK_SIZE: (u16, u16) = (80, 20);

/// Renderer terminal : efface l'écran puis écrit la frame ligne par ligne.
///
/// Le curseur est masqué pendant une lecture et toujours restauré, y compris
/// si le renderer est droppé en pleine lecture.
///
/// # Example
/// ```
/// use gs_core::frame::AsciiFrame;
/// use gs_core::traits::Renderer;
/// use gs_render::canvas::TerminalRenderer;
///
/// let mut buf = Vec::new();
/// {
///     let mut r = TerminalRenderer::new(&mut buf).with_width(6);
///     r.render(&AsciiFrame::from_rows(&["@@"]).unwrap(), true).unwrap();
/// }
/// let out = String::from_utf8(buf).unwrap();
/// assert!(out.ends_with("  @@  \r\n"));
/// ```
pub struct TerminalRenderer<W: Write> {
    out: W,
    /// Largeur imposée (sinon interrogée à chaque frame).
    fixed_width: Option<u16>,
    cursor_hidden: bool,
}

impl TerminalRenderer<io::Stdout> {
    /// Renderer on the process stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out,
            fixed_width: None,
            cursor_hidden: false,
        }
    }

    /// Use a fixed terminal width for centering instead of querying it.
    #[must_use]
    pub fn with_width(mut self, columns: u16) -> Self {
        self.fixed_width = Some(columns);
        self
    }

    fn columns(&self) -> usize {
        let cols = self
            .fixed_width
            .unwrap_or_else(|| terminal::size().map_or(FALLBACK_SIZE.0, |(c, _)| c));
        usize::from(cols)
    }

    fn restore_cursor(&mut self) {
        if self.cursor_hidden {
            self.cursor_hidden = false;
            if let Err(e) = queue!(self.out, Show).and_then(|()| self.out.flush()) {
                log::debug!("restauration du curseur impossible : {e}");
            }
        }
    }

    fn write_frame(&mut self, frame: &AsciiFrame, center: bool) -> io::Result<()> {
        let columns = if center { self.columns() } else { 0 };
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        for row in frame.rows() {
            let line: String = row.iter().collect();
            if center {
                self.out.write_all(center_line(&line, columns).as_bytes())?;
            } else {
                self.out.write_all(line.as_bytes())?;
            }
            self.out.write_all(b"\r\n")?;
        }
        self.out.flush()
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, frame: &AsciiFrame, center: bool) -> Result<(), CoreError> {
        self.write_frame(frame, center)
            .map_err(|e| CoreError::RenderFailure(e.to_string()))
    }

    fn begin(&mut self) -> Result<(), CoreError> {
        queue!(self.out, Hide)
            .and_then(|()| self.out.flush())
            .map_err(|e| CoreError::RenderFailure(e.to_string()))?;
        self.cursor_hidden = true;
        Ok(())
    }

    fn finish(&mut self) {
        self.restore_cursor();
    }
}

impl<W: Write> Drop for TerminalRenderer<W> {
    fn drop(&mut self) {
        self.restore_cursor();
    }
}

/// Centre `line` sur `width` colonnes. Le caractère de padding impair va à
/// gauche quand `width` est impair, à droite sinon.
/// Une ligne plus large que `width` est rendue telle quelle.
///
/// # Example
/// ```
/// use gs_render::canvas::center_line;
/// assert_eq!(center_line("ab", 6), "  ab  ");
/// assert_eq!(center_line("abcdef", 4), "abcdef");
/// ```
#[must_use]
pub fn center_line(line: &str, width: usize) -> String {
    let len = line.chars().count();
    if width <= len {
        return line.to_string();
    }
    let pad = width - len;
    let left = pad / 2 + (pad & width & 1);
    let right = pad - left;
    let mut out = String::with_capacity(line.len() + pad);
    out.extend(std::iter::repeat_n(' ', left));
    out.push_str(line);
    out.extend(std::iter::repeat_n(' ', right));
    out
}

/// Boîte de caractères disponible : taille du terminal moins les marges,
/// chaque dimension au moins 1.
///
/// Un terminal qui ne répond pas, ou qui rapporte 0×0, donne `fallback`.
#[must_use]
pub fn terminal_bounds(padding_cols: u16, padding_rows: u16, fallback: (u16, u16)) -> (u32, u32) {
    let (cols, rows) = match terminal::size() {
        Ok((c, r)) if c > 0 && r > 0 => (c, r),
        Ok(_) | Err(_) => fallback,
    };
    bounds_from_size((cols, rows), padding_cols, padding_rows)
}

fn bounds_from_size(size: (u16, u16), padding_cols: u16, padding_rows: u16) -> (u32, u32) {
    (
        u32::from(size.0.saturating_sub(padding_cols).max(1)),
        u32::from(size.1.saturating_sub(padding_rows).max(1)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_string(frame: &AsciiFrame, center: bool, width: u16) -> String {
        let mut buf = Vec::new();
        TerminalRenderer::new(&mut buf)
            .with_width(width)
            .render(frame, center)
            .unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn clears_then_writes_rows() {
        let frame = AsciiFrame::from_rows(&["@#", "#@"]).unwrap();
        let out = render_to_string(&frame, false, 80);
        assert!(out.starts_with("\x1b[2J"));
        assert!(out.ends_with("@#\r\n#@\r\n"));
    }

    #[test]
    fn centering_pads_both_sides() {
        let frame = AsciiFrame::from_rows(&["@"]).unwrap();
        let out = render_to_string(&frame, true, 5);
        assert!(out.ends_with("  @  \r\n"));
    }

    #[test]
    fn odd_padding_side_follows_width_parity() {
        assert_eq!(center_line("ab", 5), "  ab ");
        assert_eq!(center_line("abc", 6), " abc  ");
        assert_eq!(center_line("abc", 7), "  abc  ");
    }

    #[test]
    fn cursor_is_restored_after_playback() {
        let mut buf = Vec::new();
        {
            let mut r = TerminalRenderer::new(&mut buf);
            r.begin().unwrap();
            r.finish();
        }
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out, "\x1b[?25l\x1b[?25h");
    }

    #[test]
    fn dropping_mid_playback_restores_cursor() {
        let mut buf = Vec::new();
        {
            let mut r = TerminalRenderer::new(&mut buf);
            r.begin().unwrap();
        }
        assert!(String::from_utf8(buf).unwrap().ends_with("\x1b[?25h"));
    }

    #[test]
    fn write_errors_become_render_failures() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "fermé"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
        let mut r = TerminalRenderer::new(Broken);
        let frame = AsciiFrame::from_rows(&["@"]).unwrap();
        assert!(matches!(
            r.render(&frame, false),
            Err(CoreError::RenderFailure(_))
        ));
    }

    #[test]
    fn bounds_subtract_padding_and_stay_positive() {
        assert_eq!(bounds_from_size((80, 20), 5, 5), (75, 15));
        assert_eq!(bounds_from_size((3, 2), 5, 5), (1, 1));
    }
}
