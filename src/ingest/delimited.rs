//! 区切りテキスト（CSV/TSV等）の読み込み

use std::borrow::Cow;
use xref_common::{Error, Result};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// 区切り文字を推定する
///
/// 候補（タブ、セミコロン、カンマ、パイプ）ごとに先頭数行の列数を数え、
/// 列数が揃っていて多いものを採用する。
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).take(10).collect();

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // ヘッダー行が2列以上にならない区切りは候補外
        let target = counts.first().copied().unwrap_or(0);
        if target <= 1 {
            continue;
        }

        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// UTF-8として読めなければ Windows-1252 として読む（Excelの「CSV保存」）
fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(e) => {
            log::info!("delimited text is not UTF-8 ({}), decoding as Windows-1252", e);
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded
        }
    }
}

/// バイト列をセルのグリッドにする
pub fn read_grid(bytes: &[u8]) -> Result<Vec<Vec<String>>> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let content = decode_text(bytes);

    let delimiter = sniff_delimiter(&content);
    log::debug!("delimiter {:?}", delimiter as char);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut grid = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| Error::Parse(format!("delimited text: {}", e)))?;
        grid.push(record.iter().map(|field| field.to_string()).collect());
    }

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(sniff_delimiter("a,b,c\n1,2,3"), b',');
        assert_eq!(sniff_delimiter("a\tb\tc\n1\t2\t3"), b'\t');
        assert_eq!(sniff_delimiter("a;b;c\n1,5;2;3"), b';');
        assert_eq!(sniff_delimiter("single"), b',');
    }

    #[test]
    fn test_read_grid_quoted_fields() {
        let grid = read_grid(b"Type,Description\nA1,\"Downlight, 6\"\" aperture\"\n").unwrap();
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[1][1], "Downlight, 6\" aperture");
    }

    #[test]
    fn test_read_grid_strips_bom() {
        let grid = read_grid(b"\xEF\xBB\xBFType,MFR\nA1,Acuity\n").unwrap();
        assert_eq!(grid[0][0], "Type");
    }

    #[test]
    fn test_read_grid_windows_1252() {
        let grid = read_grid(b"Type,MFR,Notes\nA1,Acuity,Beam 40\xB0\nA2,Lithonia,\x97\n").unwrap();
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[1][2], "Beam 40\u{b0}");
        assert_eq!(grid[2][2], "\u{2014}");
    }

    #[test]
    fn test_read_grid_prefers_utf8() {
        let grid = read_grid("Type,Notes\nA1,40\u{b0} beam\n".as_bytes()).unwrap();
        assert_eq!(grid[1][1], "40\u{b0} beam");
    }

    #[test]
    fn test_read_grid_ragged_rows() {
        let grid = read_grid(b"a,b,c\n1\n1,2,3,4\n").unwrap();
        assert_eq!(grid[1].len(), 1);
        assert_eq!(grid[2].len(), 4);
    }
}
