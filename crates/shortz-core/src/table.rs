//! The finished codebook: a read-only token → code mapping, plus its JSON
//! interchange format.
//!
//! The interchange file carries both directions so generated artifacts are
//! greppable by humans:
//!
//! ```json
//! {
//!   "compress":   { "e":    {"l": 3, "v": 5}, ... },
//!   "decompress": { "101":  "e", ... }
//! }
//! ```
//!
//! Token keys are escaped: printable ASCII stays, `"` and `\` get a
//! backslash, everything else becomes `\xNN`.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::code::Code;
use crate::error::{Result, ShortzError};

/// Unique token → [`Code`] mapping. Built once, read-only thereafter; the
/// codec derives its own structures from it rather than aliasing it.
#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    entries: HashMap<Vec<u8>, Code>,
}

/// One compress-side interchange record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct CodeEntry {
    l: u32,
    v: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct TableFile {
    compress: BTreeMap<String, CodeEntry>,
    decompress: BTreeMap<String, String>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one token. Duplicate tokens are a construction error.
    pub fn insert(&mut self, token: Vec<u8>, code: Code) -> Result<()> {
        if self.entries.contains_key(&token) {
            return Err(ShortzError::DuplicateToken { token: escape_token(&token) });
        }
        self.entries.insert(token, code);
        Ok(())
    }

    pub fn get(&self, token: &[u8]) -> Option<Code> {
        self.entries.get(token).copied()
    }

    pub fn contains(&self, token: &[u8]) -> bool {
        self.entries.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], Code)> {
        self.entries.iter().map(|(t, c)| (t.as_slice(), *c))
    }

    /// Length of the longest token key.
    pub fn max_token_len(&self) -> usize {
        self.entries.keys().map(|t| t.len()).max().unwrap_or(0)
    }

    /// Scan for a pair of codes where one is a prefix of the other.
    ///
    /// Quadratic; used by tests and table-generation tooling to verify what
    /// the builders guarantee, never on the encode/decode path.
    pub fn find_prefix_conflict(&self) -> Option<(Vec<u8>, Vec<u8>)> {
        let entries: Vec<(&Vec<u8>, &Code)> = self.entries.iter().collect();
        for (i, (ta, ca)) in entries.iter().enumerate() {
            for (tb, cb) in entries.iter().skip(i + 1) {
                if ca.is_prefix_of(cb) || cb.is_prefix_of(ca) || ca == cb {
                    return Some(((*ta).clone(), (*tb).clone()));
                }
            }
        }
        None
    }

    /// Render the dual-direction interchange JSON.
    pub fn to_json(&self) -> Result<String> {
        let mut compress = BTreeMap::new();
        let mut decompress = BTreeMap::new();
        for (token, code) in &self.entries {
            let key = escape_token(token);
            compress.insert(key.clone(), CodeEntry { l: code.bit_len(), v: code.bits() });
            decompress.insert(code.to_string(), key);
        }
        Ok(serde_json::to_string_pretty(&TableFile { compress, decompress })?)
    }

    /// Parse a table from interchange JSON. Only the `compress` side is
    /// read; the `decompress` side is redundant by construction.
    pub fn from_json(s: &str) -> Result<Self> {
        let file: TableFile = serde_json::from_str(s)?;
        let mut table = Self::new();
        for (key, entry) in file.compress {
            let token = unescape_token(&key)?;
            if token.is_empty() {
                return Err(ShortzError::MalformedTable("empty token key".into()));
            }
            if entry.l == 0
                || entry.l > Code::MAX_BITS
                || (entry.l < Code::MAX_BITS && entry.v >> entry.l != 0)
            {
                return Err(ShortzError::MalformedTable(format!(
                    "code {{l: {}, v: {}}} for token `{key}` is out of range",
                    entry.l, entry.v
                )));
            }
            table.insert(token, Code::new(entry.l, entry.v))?;
        }
        Ok(table)
    }
}

impl FromIterator<(Vec<u8>, Code)> for CodeTable {
    fn from_iter<I: IntoIterator<Item = (Vec<u8>, Code)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (token, code) in iter {
            table.entries.insert(token, code);
        }
        table
    }
}

/// Escape a token for use as a JSON object key.
pub fn escape_token(token: &[u8]) -> String {
    let mut out = String::with_capacity(token.len());
    for &b in token {
        match b {
            b'"' | b'\\' => {
                out.push('\\');
                out.push(b as char);
            }
            b' '..=b'~' => out.push(b as char),
            _ => out.push_str(&format!("\\x{b:02x}")),
        }
    }
    out
}

/// Reverse [`escape_token`].
pub fn unescape_token(s: &str) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            let mut buf = [0u8; 4];
            out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            continue;
        }
        match chars.next() {
            Some('x') => {
                let hi = chars.next();
                let lo = chars.next();
                let (Some(hi), Some(lo)) = (hi, lo) else {
                    return Err(ShortzError::MalformedTable(format!("dangling \\x escape in `{s}`")));
                };
                let byte = u8::from_str_radix(&format!("{hi}{lo}"), 16).map_err(|_| {
                    ShortzError::MalformedTable(format!("bad hex escape \\x{hi}{lo} in `{s}`"))
                })?;
                out.push(byte);
            }
            Some(c @ ('"' | '\\')) => out.push(c as u8),
            other => {
                return Err(ShortzError::MalformedTable(format!(
                    "unknown escape \\{} in `{s}`",
                    other.map(String::from).unwrap_or_default()
                )));
            }
        }
    }
    Ok(out)
}
