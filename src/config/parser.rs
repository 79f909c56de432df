use std::str::FromStr;

use super::ConfigError;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigToken {
    String(String),
    Float(f32),
    Number(i32),
}

impl std::fmt::Display for ConfigToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigToken::String(s) => write!(f, "{s}"),
            ConfigToken::Float(value) => write!(f, "{value}"),
            ConfigToken::Number(value) => write!(f, "{value}"),
        }
    }
}

/// A single `KEY param param ...` line.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigLine {
    /// 1-based line number in the source text.
    pub line_number: usize,
    pub key: String,
    pub params: Vec<ConfigToken>,
}

impl ConfigLine {
    pub fn params(&self) -> &[ConfigToken] {
        &self.params
    }

    pub fn string(&self, index: usize) -> Option<String> {
        self.params.get(index).map(ToString::to_string)
    }

    /// Parse the parameter at `index` through its textual form.
    pub fn parse_param<T: FromStr>(&self, index: usize) -> Result<T, ConfigError> {
        let Some(token) = self.params.get(index) else {
            return Err(ConfigError::MissingParam {
                line: self.line_number,
                key: self.key.clone(),
                index,
            });
        };

        let text = token.to_string();
        text.parse::<T>().map_err(|_| ConfigError::InvalidValue {
            line: self.line_number,
            key: self.key.clone(),
            value: text,
        })
    }
}

/// A raw piece of a line. Quoted pieces are always strings.
#[derive(Debug, PartialEq)]
enum Word<'a> {
    Quoted(&'a str),
    Bare(&'a str),
}

impl Word<'_> {
    fn text(&self) -> &str {
        match self {
            Word::Quoted(text) | Word::Bare(text) => text,
        }
    }

    fn into_token(self) -> ConfigToken {
        match self {
            Word::Quoted(text) => ConfigToken::String(text.to_string()),
            Word::Bare(text) => {
                if let Ok(num) = text.parse::<i32>() {
                    ConfigToken::Number(num)
                } else if let Ok(num) = text.parse::<f32>() {
                    ConfigToken::Float(num)
                } else {
                    ConfigToken::String(text.to_string())
                }
            }
        }
    }
}

/// Splits a line on whitespace. A `"` groups everything up to the next `"`, or to the end of
/// the line if it is never closed.
struct Words<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Words<'a> {
    type Item = Word<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest.trim_start();
        if rest.is_empty() {
            self.rest = rest;
            return None;
        }

        if let Some(quoted) = rest.strip_prefix('"') {
            let (text, after) = quoted.split_once('"').unwrap_or((quoted, ""));
            self.rest = after;
            Some(Word::Quoted(text))
        } else {
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            self.rest = &rest[end..];
            Some(Word::Bare(&rest[..end]))
        }
    }
}

pub fn parse_line(line_number: usize, line: &str) -> Option<ConfigLine> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(';') {
        return None;
    }

    let mut words = Words { rest: line };
    let key = words.next()?.text().to_string();
    let params = words.map(Word::into_token).collect();

    Some(ConfigLine {
        line_number,
        key,
        params,
    })
}

pub struct ConfigLines {
    lines: Vec<ConfigLine>,
}

impl ConfigLines {
    pub fn parse(s: &str) -> Self {
        Self {
            lines: s
                .lines()
                .enumerate()
                .filter_map(|(i, line)| parse_line(i + 1, line))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigLine> {
        self.lines.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_comments_and_blank_lines() {
        let lines = ConfigLines::parse("; comment\n\n   \nKEY value\n");
        let lines: Vec<_> = lines.iter().collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].key, "KEY");
        assert_eq!(lines[0].line_number, 4);
    }

    #[test]
    fn typed_tokens() {
        let line = parse_line(1, r#"BONE j_kao "Left Arm" 12 0.5"#).unwrap();
        assert_eq!(line.key, "BONE");
        assert_eq!(
            line.params(),
            &[
                ConfigToken::String("j_kao".to_string()),
                ConfigToken::String("Left Arm".to_string()),
                ConfigToken::Number(12),
                ConfigToken::Float(0.5),
            ]
        );
    }

    #[test]
    fn quoted_params_stay_strings() {
        let line = parse_line(1, r#"BONE j_x "1.0" 1.0 "two words"#).unwrap();
        assert_eq!(line.string(0).as_deref(), Some("j_x"));
        assert_eq!(line.params()[1], ConfigToken::String("1.0".to_string()));
        assert_eq!(line.string(1).as_deref(), Some("1.0"));
        assert_eq!(line.params()[2], ConfigToken::Float(1.0));
        // Unclosed quotes run to the end of the line.
        assert_eq!(line.string(3).as_deref(), Some("two words"));
    }

    #[test]
    fn parse_param_reports_line_and_key() {
        let line = parse_line(7, "MIRROR_CHANGES maybe").unwrap();
        assert!(matches!(
            line.parse_param::<bool>(0),
            Err(ConfigError::InvalidValue { line: 7, .. })
        ));
        assert!(matches!(
            line.parse_param::<bool>(1),
            Err(ConfigError::MissingParam { index: 1, .. })
        ));
    }
}
