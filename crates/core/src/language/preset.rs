// crates/core/src/language/preset.rs
//! 言語プリセット: 拡張子 → 言語 → Grammar Descriptor

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::grammar::{Grammar, GrammarBuilder};
use crate::error::Result;

/// 組み込みの文法記述子を持つ言語
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,
    Cpp,
    CSharp,
    Java,
    JavaScript,
    TypeScript,
    Go,
    Rust,
    Swift,
    Kotlin,
    Dart,
    Php,
    Css,
    Scss,
    Python,
    Ruby,
    Shell,
    PowerShell,
    Perl,
    Lua,
    Sql,
    Haskell,
    Html,
    Yaml,
    R,
    Matlab,
}

impl Language {
    pub const ALL: [Self; 26] = [
        Self::C,
        Self::Cpp,
        Self::CSharp,
        Self::Java,
        Self::JavaScript,
        Self::TypeScript,
        Self::Go,
        Self::Rust,
        Self::Swift,
        Self::Kotlin,
        Self::Dart,
        Self::Php,
        Self::Css,
        Self::Scss,
        Self::Python,
        Self::Ruby,
        Self::Shell,
        Self::PowerShell,
        Self::Perl,
        Self::Lua,
        Self::Sql,
        Self::Haskell,
        Self::Html,
        Self::Yaml,
        Self::R,
        Self::Matlab,
    ];

    /// 拡張子から言語を判定 (大文字小文字を区別しない、先頭の `.` は無視)
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.strip_prefix('.').unwrap_or(ext);
        let lang = match ext.to_ascii_lowercase().as_str() {
            "c" | "h" => Self::C,
            "cpp" | "cc" | "cxx" | "c++" | "hpp" | "hh" | "hxx" | "h++" => Self::Cpp,
            "cs" => Self::CSharp,
            "java" => Self::Java,
            "js" | "mjs" | "cjs" | "jsx" => Self::JavaScript,
            "ts" | "tsx" | "mts" | "cts" => Self::TypeScript,
            "go" => Self::Go,
            "rs" => Self::Rust,
            "swift" => Self::Swift,
            "kt" | "kts" => Self::Kotlin,
            "dart" => Self::Dart,
            "php" => Self::Php,
            "css" => Self::Css,
            "scss" | "sass" | "less" => Self::Scss,
            "py" | "pyw" | "pyi" => Self::Python,
            "rb" | "rake" | "gemspec" => Self::Ruby,
            "sh" | "bash" | "zsh" => Self::Shell,
            "ps1" | "psm1" | "psd1" => Self::PowerShell,
            "pl" | "pm" => Self::Perl,
            "lua" => Self::Lua,
            "sql" => Self::Sql,
            "hs" => Self::Haskell,
            "html" | "htm" | "xhtml" | "xml" => Self::Html,
            "yaml" | "yml" => Self::Yaml,
            "r" => Self::R,
            "m" => Self::Matlab,
            _ => return None,
        };
        Some(lang)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::CSharp => "csharp",
            Self::Java => "java",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Go => "go",
            Self::Rust => "rust",
            Self::Swift => "swift",
            Self::Kotlin => "kotlin",
            Self::Dart => "dart",
            Self::Php => "php",
            Self::Css => "css",
            Self::Scss => "scss",
            Self::Python => "python",
            Self::Ruby => "ruby",
            Self::Shell => "shell",
            Self::PowerShell => "powershell",
            Self::Perl => "perl",
            Self::Lua => "lua",
            Self::Sql => "sql",
            Self::Haskell => "haskell",
            Self::Html => "html",
            Self::Yaml => "yaml",
            Self::R => "r",
            Self::Matlab => "matlab",
        }
    }

    /// この言語の Grammar Descriptor を構築
    ///
    /// # Errors
    ///
    /// Presets are validated like any other descriptor; an error here means
    /// the preset table itself is inconsistent.
    pub fn grammar(self) -> Result<Grammar> {
        let name = self.name();
        let builder = match self {
            Self::C | Self::Cpp | Self::CSharp => c_family(name).char_quote('\''),
            // Java のテキストブロック
            Self::Java => c_family(name).char_quote('\'').string_fence("\"\"\""),
            Self::Php => c_family(name).quote('\'').line_comment("#"),
            Self::JavaScript | Self::TypeScript => c_family(name).quote('\'').quote('`'),
            // Go のルーンは文字リテラル、バッククォートは raw 文字列
            Self::Go => c_family(name).char_quote('\'').quote('`'),
            // `'` は完結した文字リテラルのときだけ開く (ライフタイム `'a` はコード)
            Self::Rust => GrammarBuilder::new(name)
                .line_comment("//")
                .nesting_block_comment("/*", "*/")
                .quote('"')
                .char_quote('\'')
                .escape('\\')
                .doc_line_marker("///")
                .doc_line_marker("//!")
                .doc_block_marker("/**")
                .doc_block_marker("/*!"),
            Self::Swift => nesting_c_family(name).string_fence("\"\"\""),
            Self::Kotlin => nesting_c_family(name)
                .char_quote('\'')
                .string_fence("\"\"\""),
            Self::Dart => nesting_c_family(name)
                .quote('\'')
                .string_fence("\"\"\"")
                .string_fence("'''"),
            Self::Css => GrammarBuilder::new(name)
                .block_comment("/*", "*/")
                .quote('"')
                .quote('\'')
                .escape('\\'),
            Self::Scss => GrammarBuilder::new(name)
                .line_comment("//")
                .block_comment("/*", "*/")
                .quote('"')
                .quote('\'')
                .escape('\\'),
            Self::Python => hash_family(name)
                .docstring_fence("\"\"\"")
                .docstring_fence("'''"),
            Self::Shell | Self::R => hash_family(name),
            Self::Ruby => hash_family(name).block_comment("=begin", "=end"),
            Self::Perl => hash_family(name).block_comment("=begin", "=cut"),
            Self::PowerShell => GrammarBuilder::new(name)
                .line_comment("#")
                .block_comment("<#", "#>")
                .quote('"')
                .quote('\'')
                .escape('`'),
            Self::Yaml => GrammarBuilder::new(name)
                .line_comment("#")
                .quote('"')
                .escape('\\'),
            Self::Lua => GrammarBuilder::new(name)
                .line_comment("--")
                .block_comment("--[[", "]]")
                .quote('"')
                .quote('\'')
                .escape('\\'),
            Self::Sql => GrammarBuilder::new(name)
                .line_comment("--")
                .block_comment("/*", "*/")
                .quote('\'')
                .quote('"'),
            Self::Haskell => GrammarBuilder::new(name)
                .line_comment("--")
                .nesting_block_comment("{-", "-}")
                .quote('"')
                .escape('\\'),
            Self::Html => GrammarBuilder::new(name).block_comment("<!--", "-->"),
            Self::Matlab => GrammarBuilder::new(name)
                .line_comment("%")
                .block_comment("%{", "%}")
                .quote('"'),
        };
        builder.build()
    }
}

/// `//`, `/* */`, `"..."`, `\` エスケープ、Doxygen/Javadoc 形式の doc コメント
///
/// `'` differs per language (string, char literal), so callers add it.
fn c_family(name: &str) -> GrammarBuilder {
    GrammarBuilder::new(name)
        .line_comment("//")
        .block_comment("/*", "*/")
        .quote('"')
        .escape('\\')
        .doc_line_marker("///")
        .doc_line_marker("//!")
        .doc_block_marker("/**")
        .doc_block_marker("/*!")
}

/// Swift, Kotlin, Dart: C コメントだがブロックコメントは入れ子になる
fn nesting_c_family(name: &str) -> GrammarBuilder {
    GrammarBuilder::new(name)
        .line_comment("//")
        .nesting_block_comment("/*", "*/")
        .quote('"')
        .escape('\\')
        .doc_line_marker("///")
        .doc_block_marker("/**")
}

fn hash_family(name: &str) -> GrammarBuilder {
    GrammarBuilder::new(name)
        .line_comment("#")
        .quote('"')
        .quote('\'')
        .escape('\\')
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.name().eq_ignore_ascii_case(s))
            .ok_or(UnknownLanguage)
    }
}

/// [`Language::from_str`] で名前が一致しなかった
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown language name")]
pub struct UnknownLanguage;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_preset_builds() {
        for lang in Language::ALL {
            let grammar = lang.grammar().unwrap();
            assert_eq!(grammar.name(), lang.name());
        }
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(Language::from_extension("c"), Some(Language::C));
        assert_eq!(Language::from_extension("H"), Some(Language::C));
        assert_eq!(Language::from_extension(".cpp"), Some(Language::Cpp));
        assert_eq!(Language::from_extension("hpp"), Some(Language::Cpp));
        assert_eq!(Language::from_extension("R"), Some(Language::R));
        assert_eq!(Language::from_extension("yml"), Some(Language::Yaml));
        assert_eq!(Language::from_extension("css"), Some(Language::Css));
        assert_eq!(Language::from_extension("scss"), Some(Language::Scss));
        assert_eq!(Language::from_extension("less"), Some(Language::Scss));
        assert_eq!(Language::from_extension("txt"), None);
        assert_eq!(Language::from_extension(""), None);
    }

    #[test]
    fn test_name_round_trips_through_from_str() {
        for lang in Language::ALL {
            assert_eq!(lang.name().parse::<Language>(), Ok(lang));
        }
        assert_eq!("COBOL".parse::<Language>(), Err(UnknownLanguage));
    }

    #[test]
    fn test_php_accepts_both_line_comment_styles() {
        let g = Language::Php.grammar().unwrap();
        assert_eq!(g.line_comments(), ["//", "#"]);
    }

    #[test]
    fn test_scss_has_line_comments() {
        let g = Language::Scss.grammar().unwrap();
        assert_eq!(g.line_comments(), ["//"]);
        assert!(Language::Css.grammar().unwrap().line_comments().is_empty());
    }

    #[test]
    fn test_char_literal_presets() {
        for lang in [Language::C, Language::Cpp, Language::Java, Language::Rust, Language::Go] {
            assert_eq!(lang.grammar().unwrap().char_quotes(), ['\''], "{lang}");
        }
        for lang in [Language::JavaScript, Language::Php, Language::Python, Language::Dart] {
            let g = lang.grammar().unwrap();
            assert!(g.char_quotes().is_empty(), "{lang}");
            assert!(g.quotes().contains(&'\''), "{lang}");
        }
    }

    #[test]
    fn test_python_docstring_fences() {
        let g = Language::Python.grammar().unwrap();
        let fences: alloc::vec::Vec<(&str, bool)> = g
            .fences()
            .iter()
            .map(|fence| (fence.delimiter(), fence.is_doc()))
            .collect();
        assert_eq!(fences, [("\"\"\"", true), ("'''", true)]);
        assert!(Language::Shell.grammar().unwrap().fences().is_empty());
    }

    #[test]
    fn test_nesting_presets() {
        assert!(Language::Rust.grammar().unwrap().block_comments()[0].nests());
        assert!(Language::Haskell.grammar().unwrap().block_comments()[0].nests());
        assert!(!Language::C.grammar().unwrap().block_comments()[0].nests());
    }
}
