//! Seam to the mandatory-access-control profile compiler.
//!
//! Interfaces hand it text snippets; compiling them into a profile happens elsewhere.

/// Receiver for access-control snippets contributed by an interface.
pub trait AppArmorSpecification {
    fn add_snippet(&mut self, snippet: String);
}

/// Collects snippets in contribution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetSet {
    snippets: Vec<String>,
}

impl SnippetSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snippets(&self) -> &[String] {
        &self.snippets
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    /// All snippets joined the way they would appear in a profile body.
    pub fn render(&self) -> String {
        self.snippets.concat()
    }
}

impl AppArmorSpecification for SnippetSet {
    fn add_snippet(&mut self, snippet: String) {
        self.snippets.push(snippet);
    }
}
