use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// ## Structure
/// Data structures for the token build configuration file.
///
/// ```text
/// BuildConfig
///   ├── source: Vec<String>            (globs, relative to the config file)
///   └── platforms: IndexMap<String, PlatformConfig>
///       ├── transform_group: TransformGroup
///       │   ├── css
///       │   ├── scss
///       │   └── js
///       ├── build_path: Option<String>
///       └── files: Vec<FileConfig>
///           ├── destination: String
///           ├── format: FormatType
///           │   ├── css/variables
///           │   ├── scss/variables
///           │   ├── javascript/module
///           │   └── typescript/module-declarations
///           └── options: Option<FileOptions>
///               └── output_references: Option<bool>
/// ```

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BuildConfig {
    pub source: Vec<String>,
    pub platforms: IndexMap<String, PlatformConfig>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransformGroup {
    Css,
    Scss,
    Js,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PlatformConfig {
    pub transform_group: TransformGroup,
    pub build_path: Option<String>,
    pub files: Vec<FileConfig>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FileConfig {
    pub destination: String,
    pub format: FormatType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<FileOptions>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default)]
pub struct FileOptions {
    pub output_references: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    #[serde(rename = "css/variables")]
    CssVariables,
    #[serde(rename = "scss/variables")]
    ScssVariables,
    #[serde(rename = "javascript/module")]
    JavascriptModule,
    #[serde(rename = "typescript/module-declarations")]
    TypescriptModuleDeclarations,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub output_references: bool,
}

impl FileConfig {
    fn new(destination: &str, format: FormatType, output_references: Option<bool>) -> Self {
        Self {
            destination: destination.to_string(),
            format,
            options: output_references.map(|output_references| FileOptions {
                output_references: Some(output_references),
            }),
        }
    }

    pub fn get_options(&self) -> OutputOptions {
        let options = self.options.unwrap_or_default();
        OutputOptions {
            output_references: options.output_references.unwrap_or(false),
        }
    }
}

impl PlatformConfig {
    pub fn get_build_path(&self) -> String {
        self.build_path.clone().unwrap_or_default()
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        let platform = |transform_group, file| PlatformConfig {
            transform_group,
            build_path: Some("dist/".to_string()),
            files: vec![file],
        };

        let mut platforms = IndexMap::new();
        platforms.insert(
            "css".to_string(),
            platform(
                TransformGroup::Css,
                FileConfig::new("tokens.css", FormatType::CssVariables, Some(true)),
            ),
        );
        platforms.insert(
            "scss".to_string(),
            platform(
                TransformGroup::Scss,
                FileConfig::new("_tokens.scss", FormatType::ScssVariables, Some(true)),
            ),
        );
        platforms.insert(
            "js".to_string(),
            platform(
                TransformGroup::Js,
                FileConfig::new("tokens.js", FormatType::JavascriptModule, None),
            ),
        );
        platforms.insert(
            "ts".to_string(),
            platform(
                TransformGroup::Js,
                FileConfig::new(
                    "tokens.d.ts",
                    FormatType::TypescriptModuleDeclarations,
                    None,
                ),
            ),
        );

        Self {
            source: vec!["tokens/**/*.json".to_string()],
            platforms,
        }
    }
}
