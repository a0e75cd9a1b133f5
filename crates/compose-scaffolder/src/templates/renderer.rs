//! Writes artifact directives into the project directory

use crate::artifacts::{ArtifactDirective, Mode, Substitutions};
use crate::templates::fetcher::TemplateBundle;
use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Materialize every directive below `target_dir`, returning the written paths
/// (relative to `target_dir`) in directive order.
///
/// Stops at the first failure; files already written are left in place.
pub async fn write_artifacts(
    bundle: &TemplateBundle,
    directives: &[ArtifactDirective],
    target_dir: &Path,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(target_dir)
        .await
        .context("Failed to create target directory")?;

    let mut written = Vec::new();
    for directive in directives {
        written.extend(write_directive(bundle, directive, target_dir).await?);
    }

    Ok(written)
}

async fn write_directive(
    bundle: &TemplateBundle,
    directive: &ArtifactDirective,
    target_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let sources = bundle.resource(&directive.template_id);
    if sources.is_empty() {
        anyhow::bail!(
            "Template '{}' not found in bundle",
            directive.template_id
        );
    }

    let mut written = Vec::with_capacity(sources.len());
    for (relative, content) in sources {
        let destination = if relative.is_empty() {
            directive.destination.clone()
        } else {
            directive.destination.join(relative)
        };
        if !is_contained(&destination) {
            anyhow::bail!(
                "Template '{}' would write outside the project directory: {}",
                directive.template_id,
                destination.display()
            );
        }
        let target_path = target_dir.join(&destination);

        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        match directive.mode {
            Mode::Render => {
                let text = std::str::from_utf8(content).with_context(|| {
                    format!(
                        "Template '{}' is not valid UTF-8 and cannot be rendered",
                        directive.template_id
                    )
                })?;
                fs::write(&target_path, substitute(text, &directive.substitutions))
                    .await
                    .with_context(|| format!("Failed to write file: {}", target_path.display()))?;
            }
            Mode::RawCopy => {
                fs::write(&target_path, content)
                    .await
                    .with_context(|| format!("Failed to write file: {}", target_path.display()))?;
            }
        }

        tracing::debug!(
            template = %directive.template_id,
            path = %target_path.display(),
            mode = ?directive.mode,
            "wrote artifact"
        );
        written.push(destination);
    }

    Ok(written)
}

/// Replace every `${key}` placeholder that has a substitution; unknown placeholders stay as is.
///
/// The template is scanned once from left to right, so inserted values are never rescanned.
/// An unknown `${` is kept and scanning resumes right after it, which lets `${${key}}`
/// render to `${VALUE}`.
pub fn substitute(template: &str, substitutions: &Substitutions) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        rendered.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let known = after
            .find('}')
            .and_then(|end| substitutions.get(&after[..end]).map(|value| (end, value)));

        match known {
            Some((end, value)) => {
                rendered.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                rendered.push_str("${");
                rest = after;
            }
        }
    }

    rendered.push_str(rest);
    rendered
}

/// Only plain relative segments may be joined below the target directory
fn is_contained(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::Normal(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn bundle() -> TemplateBundle {
        let files: BTreeMap<String, Vec<u8>> = [
            (
                "template.yaml",
                "name: t\ndescription: d\nversion: 0.1.0\n".as_bytes().to_vec(),
            ),
            (
                "6.1/docker-compose-ce.yml",
                b"port: ${alfrescoPort}\ncomms: ${secureComms}\nkeep: ${unknown}\n".to_vec(),
            ),
            ("6.1/.env", b"ALFRESCO_TAG=6.1.2\n".to_vec()),
            ("6.1/alfresco-https/Dockerfile", b"FROM ${acsImage}\n".to_vec()),
            ("keystores/alfresco/keystore", vec![0xff, 0x00, 0x10]),
            ("keystores/alfresco/ssl.truststore", vec![0xfe]),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        TemplateBundle::from_files(files).unwrap()
    }

    #[test]
    fn test_substitute_replaces_known_placeholders_only() {
        let subs = Substitutions::new()
            .with("alfrescoPort", "8443")
            .with("secureComms", "https");
        assert_eq!(
            substitute(
                "${alfrescoPort}/${alfrescoPort} ${secureComms} ${other} $alfrescoPort",
                &subs
            ),
            "8443/8443 https ${other} $alfrescoPort"
        );
    }

    #[test]
    fn test_substituted_values_are_not_rescanned() {
        let first = Substitutions::new().with("a", "${b}").with("b", "x");
        let second = Substitutions::new().with("b", "x").with("a", "${b}");

        assert_eq!(substitute("${a} ${b}", &first), "${b} x");
        assert_eq!(substitute("${a} ${b}", &second), "${b} x");
    }

    #[test]
    fn test_substitute_nested_and_unterminated_placeholders() {
        let subs = Substitutions::new().with("searchTag", "SEARCH_TAG");
        assert_eq!(substitute("image:${${searchTag}}", &subs), "image:${SEARCH_TAG}");
        assert_eq!(substitute("tail ${searchTag", &subs), "tail ${searchTag");
        assert_eq!(substitute("${}", &subs), "${}");
    }

    #[tokio::test]
    async fn test_bundle_paths_cannot_escape_target() {
        let files: BTreeMap<String, Vec<u8>> = [
            ("template.yaml", b"name: t\ndescription: d\nversion: 0.1.0\n".to_vec()),
            ("keystores/solr/keystore", b"ok".to_vec()),
            ("keystores/solr/../../../escaped.txt", b"bad".to_vec()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        let bundle = TemplateBundle::from_files(files).unwrap();
        let root = tempfile::tempdir().unwrap();
        let project = root.path().join("a/project");
        let directives = vec![ArtifactDirective::raw_copy("keystores/solr", "keystores/solr")];

        let err = write_artifacts(&bundle, &directives, &project).await.unwrap_err();

        assert!(err.to_string().contains("outside the project directory"));
        assert!(!root.path().join("escaped.txt").exists());
        assert!(!root.path().join("a/escaped.txt").exists());
    }

    #[tokio::test]
    async fn test_destination_must_be_relative() {
        let dir = tempfile::tempdir().unwrap();
        let directives = vec![ArtifactDirective::raw_copy("6.1/.env", "../.env")];

        assert!(write_artifacts(&bundle(), &directives, dir.path()).await.is_err());
    }

    #[tokio::test]
    async fn test_write_render_and_copy() {
        let dir = tempfile::tempdir().unwrap();
        let directives = vec![
            ArtifactDirective::render(
                "6.1/docker-compose-ce.yml",
                "docker-compose.yml",
                Substitutions::new()
                    .with("alfrescoPort", "8080")
                    .with("secureComms", "none"),
            ),
            ArtifactDirective::raw_copy("6.1/.env", ".env"),
            ArtifactDirective::render(
                "6.1/alfresco-https",
                "alfresco-https",
                Substitutions::new().with("acsImage", "alfresco/alfresco-content-repository"),
            ),
            ArtifactDirective::raw_copy("keystores/alfresco", "keystores/alfresco"),
        ];

        let written = write_artifacts(&bundle(), &directives, dir.path()).await.unwrap();

        assert_eq!(
            written,
            vec![
                PathBuf::from("docker-compose.yml"),
                PathBuf::from(".env"),
                PathBuf::from("alfresco-https/Dockerfile"),
                PathBuf::from("keystores/alfresco/keystore"),
                PathBuf::from("keystores/alfresco/ssl.truststore"),
            ]
        );

        let compose = std::fs::read_to_string(dir.path().join("docker-compose.yml")).unwrap();
        assert_eq!(compose, "port: 8080\ncomms: none\nkeep: ${unknown}\n");

        let dockerfile =
            std::fs::read_to_string(dir.path().join("alfresco-https/Dockerfile")).unwrap();
        assert_eq!(dockerfile, "FROM alfresco/alfresco-content-repository\n");

        let keystore = std::fs::read(dir.path().join("keystores/alfresco/keystore")).unwrap();
        assert_eq!(keystore, vec![0xff, 0x00, 0x10]);
    }

    #[tokio::test]
    async fn test_missing_template_fails() {
        let dir = tempfile::tempdir().unwrap();
        let directives = vec![ArtifactDirective::raw_copy("6.1/zeppelin-https", "zeppelin-https")];

        let err = write_artifacts(&bundle(), &directives, dir.path())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("6.1/zeppelin-https"));
    }

    #[tokio::test]
    async fn test_binary_template_cannot_be_rendered() {
        let dir = tempfile::tempdir().unwrap();
        let directives = vec![ArtifactDirective::render(
            "keystores/alfresco/keystore",
            "keystore",
            Substitutions::new(),
        )];

        assert!(write_artifacts(&bundle(), &directives, dir.path()).await.is_err());
    }
}
