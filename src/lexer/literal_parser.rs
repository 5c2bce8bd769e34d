//! リテラルの解析

/// 文字列のエスケープシーケンスを処理
///
/// 不正なシーケンスはそのシーケンス文字列を`Err`で返す。
pub fn unescape_string(s: &str) -> Result<String, String> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some('0') => result.push('\0'),
            Some(c) => return Err(format!("\\{}", c)),
            None => return Err("\\".to_string()),
        }
    }

    Ok(result)
}
