//! Languages a code snippet module carries source for.

/// The fixed set of snippet languages, in selector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    Curl,
    DotNet,
    JavaScript,
    Java,
    #[default]
    JavaAndroid,
    Php,
    Python,
    Ruby,
    Swift,
}

impl Language {
    pub const ALL: [Language; 9] = [
        Language::Curl,
        Language::DotNet,
        Language::JavaScript,
        Language::Java,
        Language::JavaAndroid,
        Language::Php,
        Language::Python,
        Language::Ruby,
        Language::Swift,
    ];

    /// Display name, as shown in the selector and copied as the clipboard label.
    pub fn name(self) -> &'static str {
        match self {
            Language::Curl => "curl",
            Language::DotNet => "dotnet",
            Language::JavaScript => "javascript",
            Language::Java => "java",
            Language::JavaAndroid => "java-android",
            Language::Php => "php",
            Language::Python => "python",
            Language::Ruby => "ruby",
            Language::Swift => "swift",
        }
    }

    /// Look up a language by name. Case, `-`, `_` and spaces are ignored,
    /// so `Java-Android`, `javaAndroid` and `java_android` all match.
    pub fn from_name(name: &str) -> Option<Language> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "curl" => Some(Language::Curl),
            "dotnet" => Some(Language::DotNet),
            "javascript" => Some(Language::JavaScript),
            "java" => Some(Language::Java),
            "javaandroid" => Some(Language::JavaAndroid),
            "php" => Some(Language::Php),
            "python" => Some(Language::Python),
            "ruby" => Some(Language::Ruby),
            "swift" => Some(Language::Swift),
            _ => None,
        }
    }

    /// Like [`Language::from_name`], but unknown or absent names give the default.
    pub fn from_name_or_default(name: Option<&str>) -> Language {
        name.and_then(Language::from_name).unwrap_or_default()
    }

    /// Extension token used to pick a syntect syntax.
    pub fn syntax_token(self) -> &'static str {
        match self {
            Language::Curl => "sh",
            Language::DotNet => "cs",
            Language::JavaScript => "js",
            Language::Java | Language::JavaAndroid => "java",
            Language::Php => "php",
            Language::Python => "py",
            Language::Ruby => "rb",
            Language::Swift => "swift",
        }
    }

    fn index(self) -> usize {
        Language::ALL.iter().position(|&l| l == self).unwrap_or(0)
    }

    /// Next language in selector order, wrapping around.
    pub fn next(self) -> Language {
        Language::ALL[(self.index() + 1) % Language::ALL.len()]
    }

    /// Previous language in selector order, wrapping around.
    pub fn prev(self) -> Language {
        let len = Language::ALL.len();
        Language::ALL[(self.index() + len - 1) % len]
    }
}
