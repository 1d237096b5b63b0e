use gs_core::diagnostics::Diagnostics;

/// Rapport hauteur/largeur d'un glyphe terminal compensé : une cellule couvre
/// environ deux lignes de pixels pour une colonne.
const GLYPH_ASPECT: f64 = 0.5;

/// Dimensions of the character grid chosen for a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSize {
    pub width: u32,
    pub height: u32,
}

/// `floor(ar * width * 0.5)`.
#[inline]
fn cell_height(aspect: f64, width: u32) -> u32 {
    (aspect * f64::from(width) * GLYPH_ASPECT).floor() as u32
}

/// Recherche d'ajustement : la plus grande largeur ≤ `target_width` dont la
/// hauteur proportionnelle tient dans `max_height`.
///
/// La largeur est décrémentée une colonne à la fois tant que la hauteur
/// dépasse la borne. La hauteur est monotone en la largeur, donc la boucle
/// termine au plus tard à largeur 0. Une hauteur (ou largeur) nulle est
/// forcée à 1 avec un avertissement.
///
/// `src_width` and `src_height` must be non-zero.
///
/// # Example
/// ```
/// use gs_ascii::fit::{fit_dimensions, CellSize};
/// use gs_core::diagnostics::MemoryDiagnostics;
/// let diag = MemoryDiagnostics::default();
/// // Square source, 80 columns → 40 rows, but only 20 fit: width shrinks to 41.
/// let size = fit_dimensions(100, 100, 80, 20, &diag);
/// assert_eq!(size, CellSize { width: 41, height: 20 });
/// ```
pub fn fit_dimensions(
    src_width: u32,
    src_height: u32,
    target_width: u32,
    max_height: u32,
    diagnostics: &dyn Diagnostics,
) -> CellSize {
    debug_assert!(src_width > 0 && src_height > 0, "degenerate source");
    let aspect = f64::from(src_height) / f64::from(src_width.max(1));

    let mut width = target_width;
    let mut height = cell_height(aspect, width);
    while height > max_height && width > 0 {
        width -= 1;
        height = cell_height(aspect, width);
    }

    if height == 0 {
        diagnostics.warn(&format!(
            "Hauteur ASCII calculée trop petite ({height}) pour {src_width}×{src_height} \
             sur {width} colonnes, hauteur minimale forcée à 1."
        ));
        height = 1;
    }
    if width == 0 {
        diagnostics.warn("Largeur ASCII nulle, largeur minimale forcée à 1.");
        width = 1;
    }

    CellSize { width, height }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gs_core::diagnostics::MemoryDiagnostics;

    #[test]
    fn fits_without_shrinking_when_room() {
        let diag = MemoryDiagnostics::default();
        let size = fit_dimensions(10, 10, 10, 10, &diag);
        assert_eq!(size, CellSize { width: 10, height: 5 });
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn tall_source_trades_width_for_height() {
        let diag = MemoryDiagnostics::default();
        // ar = 4 → h = 2w; max 10 rows → w = 5.
        let size = fit_dimensions(50, 200, 75, 10, &diag);
        assert_eq!(size, CellSize { width: 5, height: 10 });
    }

    #[test]
    fn very_wide_source_is_clamped_to_one_row() {
        let diag = MemoryDiagnostics::default();
        let size = fit_dimensions(1000, 1, 75, 15, &diag);
        assert_eq!(size, CellSize { width: 75, height: 1 });
        assert_eq!(diag.warnings().len(), 1);
    }

    #[test]
    fn zero_max_height_never_yields_zero_cells() {
        let diag = MemoryDiagnostics::default();
        let size = fit_dimensions(10, 10, 80, 0, &diag);
        assert!(size.width >= 1 && size.height >= 1);
    }

    #[test]
    fn height_always_within_bounds() {
        let diag = MemoryDiagnostics::default();
        let sources = [(1, 1), (3, 7), (640, 480), (1, 500), (500, 1), (17, 1024)];
        for &(sw, sh) in &sources {
            for tw in [1u32, 2, 7, 40, 75, 200] {
                for mh in [1u32, 2, 5, 15, 60] {
                    let size = fit_dimensions(sw, sh, tw, mh, &diag);
                    assert!(
                        size.height >= 1 && size.height <= mh,
                        "{sw}×{sh} w={tw} max={mh} → {size:?}"
                    );
                    assert!(size.width >= 1 && size.width <= tw);
                }
            }
        }
    }
}
