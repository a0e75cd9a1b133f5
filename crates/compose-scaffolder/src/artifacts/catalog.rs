//! Rule catalog mapping resolved answers to artifact directives
//!
//! Every rule is a `(guard, build)` pair over the answers alone. Rules never look at
//! each other's output, so selection is just a filter over the catalog in declaration order.

use super::directive::ArtifactDirective;
use crate::questions::Answers;

/// Guard deciding whether a rule contributes a directive
pub type Guard = fn(&Answers) -> bool;

/// Builds the directive for a rule whose guard passed
pub type Build = fn(&Answers) -> ArtifactDirective;

#[derive(Clone)]
pub struct ArtifactRule {
    pub name: &'static str,
    guard: Guard,
    build: Build,
}

impl ArtifactRule {
    pub fn applies(&self, answers: &Answers) -> bool {
        (self.guard)(answers)
    }

    pub fn build(&self, answers: &Answers) -> ArtifactDirective {
        (self.build)(answers)
    }
}

impl std::fmt::Debug for ArtifactRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactRule").field("name", &self.name).finish()
    }
}

/// Ordered list of artifact rules
#[derive(Debug, Clone, Default)]
pub struct ArtifactCatalog {
    rules: Vec<ArtifactRule>,
}

impl ArtifactCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule; output order follows declaration order
    pub fn rule(mut self, name: &'static str, guard: Guard, build: Build) -> Self {
        self.rules.push(ArtifactRule { name, guard, build });
        self
    }

    /// Append a rule that always applies
    pub fn always(self, name: &'static str, build: Build) -> Self {
        self.rule(name, |_| true, build)
    }

    /// Directives for every rule whose guard holds, in catalog order
    pub fn select(&self, answers: &Answers) -> Vec<ArtifactDirective> {
        self.rules
            .iter()
            .filter(|rule| rule.applies(answers))
            .map(|rule| {
                let directive = rule.build(answers);
                tracing::debug!(
                    rule = rule.name,
                    template = %directive.template_id,
                    "selected artifact"
                );
                directive
            })
            .collect()
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
