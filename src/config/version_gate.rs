//! Version gating for config file names.
//!
//! A version-specific source embeds `<tool><major>` in its name, either as a
//! file (`brush1rc.toml`) or as a directory holding a plain rc file
//! (`brush1/brushrc.toml`). Only the running tool's own major version is
//! eligible; any other token is rejected, including tokens that belong to a
//! different tool name.

/// Outcome of checking one file or directory name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    /// No version token: an ordinary name.
    Unversioned,
    /// Token matches this tool and major version.
    Matching,
    /// Token present but for another tool or another major version.
    Mismatched { token: String },
}

/// Name-level gate for one tool generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionGate {
    tool: String,
    major: u32,
}

impl VersionGate {
    pub fn new(tool: impl Into<String>, major: u32) -> Self {
        Self {
            tool: tool.into(),
            major,
        }
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    /// Version token this gate accepts, e.g. `brush1`.
    pub fn token(&self) -> String {
        format!("{}{}", self.tool, self.major)
    }

    /// File name of the version-specific rc file, e.g. `brush1rc.toml`.
    pub fn rc_file_name(&self) -> String {
        format!("{}rc.toml", self.token())
    }

    /// Classify a version-specific rc file name (`<name><digits>rc.toml`).
    pub fn classify_file(&self, file_name: &str) -> Eligibility {
        match file_name.strip_suffix("rc.toml") {
            Some(stem) => self.classify_token(stem),
            None => Eligibility::Unversioned,
        }
    }

    /// Classify a directory name (`<name><digits>`).
    pub fn classify_dir(&self, dir_name: &str) -> Eligibility {
        self.classify_token(dir_name)
    }

    fn classify_token(&self, token: &str) -> Eligibility {
        let Some((name, digits)) = split_version_token(token) else {
            return Eligibility::Unversioned;
        };
        let matches = name == self.tool && digits == self.major.to_string();
        if matches {
            Eligibility::Matching
        } else {
            Eligibility::Mismatched {
                token: token.to_string(),
            }
        }
    }
}

/// Split `brush12` into `("brush", "12")`. The name part must be non-empty
/// and alphabetic (dots, dashes and underscores allowed) and the digit run
/// must reach the end of the token.
fn split_version_token(token: &str) -> Option<(&str, &str)> {
    let digits_start = token
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    let (name, digits) = token.split_at(digits_start);
    let valid_name = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphabetic() || matches!(c, '.' | '-' | '_'));
    valid_name.then_some((name, digits))
}
