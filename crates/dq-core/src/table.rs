//! Tables de disposition (couleurs, images, poids) lues depuis du texte CSV.
//!
//! Aucune validation de forme ici : les lignes peuvent avoir des longueurs
//! différentes, l'assembleur ramène tout à la forme de la table des couleurs.

use crate::error::CoreError;

/// Lignes de cellules, row-major. Les lignes peuvent être de longueurs inégales.
pub type Matrix<T> = Vec<Vec<T>>;

/// Poids par défaut d'une cellule.
pub const DEFAULT_WEIGHT: u32 = 1;

/// Une ligne de texte = une ligne de la matrice. Le lecteur csv saute les
/// lignes vides ; ici elles donnent une ligne sans cellule, pour que les
/// lignes suivantes gardent leur indice. Pas de champ cité sur plusieurs lignes.
fn read_rows(text: &str) -> Result<Matrix<String>, CoreError> {
    let mut rows = Vec::new();
    for line in text.lines() {
        if line.is_empty() {
            rows.push(Vec::new());
            continue;
        }
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(line.as_bytes());
        let mut record = csv::StringRecord::new();
        if reader.read_record(&mut record)? {
            rows.push(record.iter().map(String::from).collect());
        } else {
            rows.push(Vec::new());
        }
    }
    Ok(rows)
}

/// Charge la table des couleurs (une couleur par cellule, hex ou nom).
///
/// # Errors
/// Returns [`CoreError::Table`] if the text is not readable as CSV.
///
/// # Example
/// ```
/// use dq_core::table::load_color_table;
/// let colors = load_color_table("#000000,#ffffff\n#ff0000,#00ff00\n").unwrap();
/// assert_eq!(colors.len(), 2);
/// assert_eq!(colors[0][1], "#ffffff");
/// ```
pub fn load_color_table(text: &str) -> Result<Matrix<String>, CoreError> {
    read_rows(text)
}

/// Charge la table des images. Une cellule vide (ou blanche) vaut `None` :
/// la cellule sera remplie de sa couleur.
///
/// # Errors
/// Returns [`CoreError::Table`] if the text is not readable as CSV.
///
/// # Example
/// ```
/// use dq_core::table::load_image_table;
/// let images = load_image_table("photo.jpg,\n").unwrap();
/// assert_eq!(images[0], vec![Some("photo.jpg".to_string()), None]);
/// ```
pub fn load_image_table(text: &str) -> Result<Matrix<Option<String>>, CoreError> {
    Ok(read_rows(text)?
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|name| {
                    let trimmed = name.trim();
                    (!trimmed.is_empty()).then(|| trimmed.to_string())
                })
                .collect()
        })
        .collect())
}

/// Charge la table des poids. Les cellules illisibles valent [`DEFAULT_WEIGHT`].
///
/// # Errors
/// Returns [`CoreError::Table`] if the text is not readable as CSV.
///
/// # Example
/// ```
/// use dq_core::table::load_weight_table;
/// let weights = load_weight_table("2,,abc,3.0\n").unwrap();
/// assert_eq!(weights, vec![vec![2, 1, 1, 3]]);
/// ```
pub fn load_weight_table(text: &str) -> Result<Matrix<u32>, CoreError> {
    let rows = read_rows(text)?;
    let mut weights = Vec::with_capacity(rows.len());
    for (r, row) in rows.iter().enumerate() {
        let parsed = row
            .iter()
            .enumerate()
            .map(|(c, cell)| {
                let weight = parse_weight(cell);
                if weight == DEFAULT_WEIGHT && !is_default_literal(cell) {
                    log::warn!("Poids illisible {cell:?} en ({r}, {c}), utilisation de 1");
                }
                weight
            })
            .collect();
        weights.push(parsed);
    }
    Ok(weights)
}

/// Cellule vide ou valant explicitement 1.
fn is_default_literal(cell: &str) -> bool {
    let s = cell.trim();
    s.is_empty() || strict_weight(s) == Some(DEFAULT_WEIGHT)
}

/// Convertit une cellule de poids en entier positif.
///
/// Vide → 1. Entier → sa valeur. Littéral flottant (`"2.0"`, `"2.7"`) →
/// partie entière. Tout le reste, ainsi que les valeurs < 1 ou hors `u32`,
/// retombe silencieusement sur 1.
///
/// # Example
/// ```
/// use dq_core::table::parse_weight;
/// assert_eq!(parse_weight(""), 1);
/// assert_eq!(parse_weight("2"), 2);
/// assert_eq!(parse_weight("2.0"), 2);
/// assert_eq!(parse_weight("abc"), 1);
/// ```
#[must_use]
pub fn parse_weight(cell: &str) -> u32 {
    strict_weight(cell.trim()).unwrap_or(DEFAULT_WEIGHT)
}

fn strict_weight(s: &str) -> Option<u32> {
    let value = match s.parse::<i64>() {
        Ok(v) => Some(v),
        Err(_) => s
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && f.abs() < 9.0e15)
            .map(|f| f.trunc() as i64),
    };
    value
        .and_then(|v| u32::try_from(v).ok())
        .filter(|&v| v >= 1)
}

/// Cellule (row, col) si elle existe.
#[must_use]
pub fn cell<T>(matrix: &[Vec<T>], row: usize, col: usize) -> Option<&T> {
    matrix.get(row).and_then(|r| r.get(col))
}

/// Ramène `matrix` à exactement `rows`×`cols` : tronque ce qui dépasse,
/// complète avec `fill` ce qui manque.
///
/// # Example
/// ```
/// use dq_core::table::conform;
/// let ragged = vec![vec![5, 6, 7], vec![8]];
/// assert_eq!(conform(&ragged, 3, 2, 1), vec![vec![5, 6], vec![8, 1], vec![1, 1]]);
/// ```
#[must_use]
pub fn conform<T: Clone>(matrix: &[Vec<T>], rows: usize, cols: usize, fill: T) -> Matrix<T> {
    (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| cell(matrix, r, c).cloned().unwrap_or_else(|| fill.clone()))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_defaulting() {
        assert_eq!(parse_weight(""), 1);
        assert_eq!(parse_weight("   "), 1);
        assert_eq!(parse_weight("abc"), 1);
        assert_eq!(parse_weight("2"), 2);
        assert_eq!(parse_weight(" 2.0 "), 2);
        assert_eq!(parse_weight("2.9"), 2);
        assert_eq!(parse_weight("1e2"), 100);
        assert_eq!(parse_weight("0"), 1);
        assert_eq!(parse_weight("-4"), 1);
        assert_eq!(parse_weight("nan"), 1);
        assert_eq!(parse_weight("inf"), 1);
        assert_eq!(parse_weight("99999999999"), 1);
    }

    #[test]
    fn ragged_rows_are_kept_as_is() -> Result<(), CoreError> {
        let colors = load_color_table("a,b,c\nd\ne,f\n")?;
        let lens: Vec<usize> = colors.iter().map(Vec::len).collect();
        assert_eq!(lens, vec![3, 1, 2]);
        Ok(())
    }

    #[test]
    fn quoted_cells_follow_csv_rules() -> Result<(), CoreError> {
        let images = load_image_table("\"my, photo.jpg\",\" \"\n")?;
        assert_eq!(images[0], vec![Some("my, photo.jpg".to_string()), None]);
        Ok(())
    }

    #[test]
    fn weight_table_mixes_values_and_fallbacks() -> Result<(), CoreError> {
        let weights = load_weight_table("1,2\n,x,5.0\n")?;
        assert_eq!(weights, vec![vec![1, 2], vec![1, 1, 5]]);
        Ok(())
    }

    #[test]
    fn blank_lines_keep_row_alignment() -> Result<(), CoreError> {
        let images = load_image_table("photo.jpg\n\nother.jpg\n")?;
        assert_eq!(
            images,
            vec![vec![Some("photo.jpg".to_string())], vec![], vec![Some("other.jpg".to_string())]]
        );
        assert_eq!(cell(&images, 1, 0), None);

        let weights = load_weight_table("2\n\n3\n")?;
        assert_eq!(weights, vec![vec![2], vec![], vec![3]]);
        assert_eq!(conform(&weights, 3, 1, DEFAULT_WEIGHT), vec![vec![2], vec![1], vec![3]]);
        Ok(())
    }

    #[test]
    fn crlf_and_missing_trailing_newline() -> Result<(), CoreError> {
        let colors = load_color_table("red,blue\r\n\r\nwhite")?;
        assert_eq!(
            colors,
            vec![
                vec!["red".to_string(), "blue".to_string()],
                vec![],
                vec!["white".to_string()]
            ]
        );
        Ok(())
    }

    #[test]
    fn loader_and_parse_weight_agree() -> Result<(), CoreError> {
        let cells = ["", " 7 ", "2.9", "abc", "0", "-3", "1", "1e2"];
        let weights = load_weight_table(&cells.join(","))?;
        let expected: Vec<u32> = cells.iter().map(|c| parse_weight(c)).collect();
        assert_eq!(weights, vec![expected]);
        Ok(())
    }

    #[test]
    fn conform_pads_and_truncates() {
        let m: Matrix<bool> = vec![vec![true; 4]];
        let out = conform(&m, 2, 2, false);
        assert_eq!(out, vec![vec![true, true], vec![false, false]]);
        assert!(conform::<u32>(&[], 0, 5, 1).is_empty());
    }

    #[test]
    fn cell_lookup_out_of_range() {
        let m = vec![vec![1, 2], vec![3]];
        assert_eq!(cell(&m, 0, 1), Some(&2));
        assert_eq!(cell(&m, 1, 1), None);
        assert_eq!(cell(&m, 5, 0), None);
    }
}
