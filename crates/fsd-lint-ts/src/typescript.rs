//! TypeScript / TSX import extractor using Tree-sitter.
//!
//! Recognized forms:
//!
//! - `import x from "m"`, `import type { T } from "m"`, `import "m"`
//! - `import x = require("m")`
//! - `export { x } from "m"`, `export * from "m"`
//! - dynamic `import("m")` and `require("m")` with a literal argument

use tree_sitter::{Language, Node, Parser};

use crate::extractor::{ExtractError, FileAnalysis, ImportInfo, LanguageExtractor};

/// Extracts import specifiers from TypeScript or TSX source.
pub struct TypeScriptExtractor {
    language: Language,
    id: &'static str,
    extensions: &'static [&'static str],
}

impl TypeScriptExtractor {
    /// Extractor for plain TypeScript (`.ts`, `.mts`, `.cts`).
    #[must_use]
    pub fn typescript() -> Self {
        Self {
            language: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            id: "typescript",
            extensions: &[".ts", ".mts", ".cts"],
        }
    }

    /// Extractor for TSX, also used for JavaScript and JSX sources.
    #[must_use]
    pub fn tsx() -> Self {
        Self {
            language: tree_sitter_typescript::LANGUAGE_TSX.into(),
            id: "tsx",
            extensions: &[".tsx", ".js", ".jsx", ".mjs", ".cjs"],
        }
    }

    /// Both extractors, covering every supported extension.
    #[must_use]
    pub fn all() -> Vec<Box<dyn LanguageExtractor>> {
        vec![Box::new(Self::typescript()), Box::new(Self::tsx())]
    }

    /// The specifier inside a string literal node, with its byte span.
    fn literal(node: &Node<'_>, src: &[u8]) -> Option<ImportInfo> {
        match node.kind() {
            "string" => {}
            "template_string" => {
                let mut cursor = node.walk();
                if node
                    .named_children(&mut cursor)
                    .any(|c| c.kind() == "template_substitution")
                {
                    return None;
                }
            }
            _ => return None,
        }

        let text = node.utf8_text(src).ok()?;
        if text.len() < 2 {
            return None;
        }
        let specifier = &text[1..text.len() - 1];
        let start = node.start_position();
        Some(ImportInfo {
            line: start.row + 1,
            column: start.column + 1,
            offset: node.start_byte() + 1,
            length: specifier.len(),
            specifier: specifier.to_owned(),
        })
    }

    fn source_field(node: &Node<'_>, src: &[u8]) -> Option<ImportInfo> {
        node.child_by_field_name("source")
            .and_then(|s| Self::literal(&s, src))
    }

    fn call_argument(node: &Node<'_>, src: &[u8]) -> Option<ImportInfo> {
        let function = node.child_by_field_name("function")?;
        let is_loader = match function.kind() {
            "import" => true,
            "identifier" => function.utf8_text(src).ok() == Some("require"),
            _ => false,
        };
        if !is_loader {
            return None;
        }
        let arguments = node.child_by_field_name("arguments")?;
        let first = arguments.named_child(0)?;
        Self::literal(&first, src)
    }

    fn extract(node: &Node<'_>, src: &[u8]) -> Option<ImportInfo> {
        match node.kind() {
            "import_statement" => Self::source_field(node, src).or_else(|| {
                let mut cursor = node.walk();
                let clause = node
                    .named_children(&mut cursor)
                    .find(|c| c.kind() == "import_require_clause")?;
                Self::source_field(&clause, src)
            }),
            "export_statement" => Self::source_field(node, src),
            "call_expression" => Self::call_argument(node, src),
            _ => None,
        }
    }
}

impl LanguageExtractor for TypeScriptExtractor {
    fn language_id(&self) -> &'static str {
        self.id
    }

    fn extensions(&self) -> &'static [&'static str] {
        self.extensions
    }

    fn analyze(&self, source: &str) -> Result<FileAnalysis, ExtractError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|source| ExtractError::Language {
                language: self.id,
                source,
            })?;

        let src = source.as_bytes();
        let tree = parser
            .parse(src, None)
            .ok_or(ExtractError::Parse { language: self.id })?;

        let mut imports = Vec::new();
        let mut stack = vec![tree.root_node()];
        while let Some(node) = stack.pop() {
            if let Some(import) = Self::extract(&node, src) {
                imports.push(import);
            }
            let mut cursor = node.walk();
            let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }

        Ok(FileAnalysis {
            file_path: std::path::PathBuf::new(),
            imports,
        })
    }
}
