//! 文字列定数プール
//!
//! 文字列リテラルは線形メモリ先頭からのデータセグメントに詰めて配置する。
//! 同じ内容のリテラルは同じ領域を共有する。

use indexmap::IndexMap;

const PAGE_SIZE: usize = 65536;

/// 文字列定数プール
#[derive(Debug, Default)]
pub struct ConstantPool {
    /// 内容 → オフセット（登録順）
    strings: IndexMap<String, u32>,
    size: u32,
}

impl ConstantPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// 文字列を登録して(オフセット, バイト長)を返す
    pub fn intern(&mut self, text: &str) -> (u32, u32) {
        let len = text.len() as u32;
        if let Some(&offset) = self.strings.get(text) {
            return (offset, len);
        }
        let offset = self.size;
        self.strings.insert(text.to_string(), offset);
        self.size += len;
        (offset, len)
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// 必要なメモリページ数（最低1ページ）
    pub fn pages(&self) -> usize {
        (self.size as usize).div_ceil(PAGE_SIZE).max(1)
    }

    /// データセグメント（定数がなければ`None`）
    pub fn data_segment(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let mut bytes = String::new();
        for text in self.strings.keys() {
            escape_into(text, &mut bytes);
        }
        Some(format!("(data (i32.const 0) \"{}\")", bytes))
    }
}

/// WATの文字列表記にエスケープ
fn escape_into(text: &str, out: &mut String) {
    for byte in text.bytes() {
        match byte {
            b'"' | b'\\' => out.push_str(&format!("\\{:02x}", byte)),
            0x20..=0x7e => out.push(byte as char),
            _ => out.push_str(&format!("\\{:02x}", byte)),
        }
    }
}
