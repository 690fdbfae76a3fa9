//! Prompt Loader
//!
//! Loads prompt templates from files or falls back to embedded defaults.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use super::embedded;

/// Context for rendering the re-plan request template
#[derive(Debug, Clone, Serialize)]
pub struct ReplanContext {
    /// Instruction of the step the user is stuck on
    pub step: String,
    /// The barrier the user reported
    pub barrier: String,
    /// The overall target goal
    pub goal: String,
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// User override directory (e.g., `.snowball/prompts/`)
    user_dir: Option<PathBuf>,
    /// Repo default directory (e.g., `prompts/`)
    repo_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a new prompt loader rooted at the given directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let user_dir = root.join(".snowball/prompts");
        let repo_dir = root.join("prompts");

        debug!(?user_dir, ?repo_dir, "PromptLoader::new: checking directories");

        Self {
            hbs: Handlebars::new(),
            user_dir: user_dir.exists().then_some(user_dir),
            repo_dir: repo_dir.exists().then_some(repo_dir),
        }
    }

    /// Create a loader that only uses embedded prompts
    pub fn embedded_only() -> Self {
        Self {
            hbs: Handlebars::new(),
            user_dir: None,
            repo_dir: None,
        }
    }

    /// Load a template by name
    ///
    /// Checks in order:
    /// 1. User override: `.snowball/prompts/{name}.pmt`
    /// 2. Repo default: `prompts/{name}.pmt`
    /// 3. Embedded fallback
    fn load_template(&self, name: &str) -> Result<String> {
        if let Some(ref user_dir) = self.user_dir {
            let path = user_dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!(?path, "load_template: found in user override");
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read user prompt {}: {}", path.display(), e));
            }
        }

        if let Some(ref repo_dir) = self.repo_dir {
            let path = repo_dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!(?path, "load_template: found in repo");
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read repo prompt {}: {}", path.display(), e));
            }
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!(%name, "load_template: using embedded");
            return Ok(content.to_string());
        }

        Err(eyre!("Prompt template not found: {}", name))
    }

    /// Get the breakdown system prompt
    pub fn breakdown_prompt(&self) -> Result<String> {
        self.load_template("breakdown")
    }

    /// Get the re-plan system prompt
    pub fn replan_prompt(&self) -> Result<String> {
        self.load_template("replan")
    }

    /// Render the re-plan user message for the given context
    pub fn replan_request(&self, context: &ReplanContext) -> Result<String> {
        let template = self.load_template("replan-request")?;
        self.hbs
            .render_template(&template, context)
            .map_err(|e| eyre!("Failed to render template replan-request: {}", e))
    }
}
