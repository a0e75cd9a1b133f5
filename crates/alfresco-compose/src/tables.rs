//! Lookup tables mapping answer combinations to template values

use crate::questions::{
    ALFRESCO_VERSION, COMMUNITY, HTTPS, HTTP_MODE, INSIGHT_ENGINE, SHARDING_METHOD,
};
use compose_scaffolder::Answers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edition {
    Community,
    Enterprise,
}

impl Edition {
    /// Anything other than `community` is treated as enterprise
    pub fn from_answers(answers: &Answers) -> Self {
        match answers.text(ALFRESCO_VERSION) {
            Some(COMMUNITY) => Edition::Community,
            _ => Edition::Enterprise,
        }
    }

    /// Suffix of the docker-compose template for this edition
    pub fn compose_suffix(self) -> &'static str {
        match self {
            Edition::Community => "ce",
            Edition::Enterprise => "ee",
        }
    }

    /// Repository image for this edition
    pub fn repository_image(self) -> &'static str {
        match self {
            Edition::Community => "alfresco/alfresco-content-repository-community",
            Edition::Enterprise => "alfresco/alfresco-content-repository",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMode {
    Http,
    Https,
}

/// Transport settings written into the compose file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transport {
    pub secure_comms: &'static str,
    pub protocol: &'static str,
    pub port: &'static str,
}

impl HttpMode {
    /// Only `https` enables TLS
    pub fn from_answers(answers: &Answers) -> Self {
        match answers.text(HTTP_MODE) {
            Some(HTTPS) => HttpMode::Https,
            _ => HttpMode::Http,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMode::Http => "http",
            HttpMode::Https => "https",
        }
    }

    pub fn transport(self) -> Transport {
        match self {
            HttpMode::Http => Transport {
                secure_comms: "none",
                protocol: "http",
                port: "8080",
            },
            HttpMode::Https => Transport {
                secure_comms: "https",
                protocol: "https",
                port: "8443",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEngine {
    SearchServices,
    InsightEngine,
}

impl SearchEngine {
    pub fn from_answers(answers: &Answers) -> Self {
        if answers.flag(INSIGHT_ENGINE) {
            SearchEngine::InsightEngine
        } else {
            SearchEngine::SearchServices
        }
    }
}

/// Where the search image lives and how it is configured inside the container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchDistribution {
    pub image: &'static str,
    /// Name of the `.env` variable holding the image tag
    pub tag_variable: &'static str,
    /// Install directory inside the image
    pub path: &'static str,
}

const COMMUNITY_SEARCH: SearchDistribution = SearchDistribution {
    image: "alfresco/alfresco-search-services",
    tag_variable: "SEARCH_CE_TAG",
    path: "alfresco-search-services",
};

const ENTERPRISE_SEARCH: SearchDistribution = SearchDistribution {
    image: "quay.io/alfresco/search-services",
    tag_variable: "SEARCH_CE_TAG",
    path: "alfresco-search-services",
};

const INSIGHT_ENGINE_SEARCH: SearchDistribution = SearchDistribution {
    image: "quay.io/alfresco/insight-engine",
    tag_variable: "SEARCH_TAG",
    path: "alfresco-insight-engine",
};

/// Insight Engine ships with enterprise only; community keeps Search Services.
pub fn search_distribution(edition: Edition, engine: SearchEngine) -> SearchDistribution {
    match (edition, engine) {
        (Edition::Community, SearchEngine::SearchServices) => COMMUNITY_SEARCH,
        (Edition::Community, SearchEngine::InsightEngine) => COMMUNITY_SEARCH,
        (Edition::Enterprise, SearchEngine::SearchServices) => ENTERPRISE_SEARCH,
        (Edition::Enterprise, SearchEngine::InsightEngine) => INSIGHT_ENGINE_SEARCH,
    }
}

/// Base image for the derived search builds (`search-https`, `replication-none`).
/// Keyed on the engine alone: Search Services always comes from the public image here.
pub fn auxiliary_search_image(engine: SearchEngine) -> SearchDistribution {
    match engine {
        SearchEngine::SearchServices => COMMUNITY_SEARCH,
        SearchEngine::InsightEngine => INSIGHT_ENGINE_SEARCH,
    }
}

/// Host the repository tracks; replicated setups query the slave
pub fn solr_host(replication: bool) -> &'static str {
    if replication {
        "solr6slave"
    } else {
        "solr6"
    }
}

/// Number of SOLR shard nodes in a sharded deployment
pub const SHARD_COUNT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShardingMethod {
    DbId,
    DbIdRange,
    Date,
}

/// `solrcore.properties` lines for each shard node, `\n` escaped for a Dockerfile `echo -e`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardLayout {
    pub method: &'static str,
    pub shard_properties: [&'static str; SHARD_COUNT],
}

impl ShardingMethod {
    /// Unrecognised or missing methods fall back to `DB_ID`
    pub fn from_answers(answers: &Answers) -> Self {
        match answers.text(SHARDING_METHOD) {
            Some("DB_ID_RANGE") => ShardingMethod::DbIdRange,
            Some("DATE") => ShardingMethod::Date,
            _ => ShardingMethod::DbId,
        }
    }

    pub fn layout(self) -> ShardLayout {
        match self {
            ShardingMethod::DbId => ShardLayout {
                method: "DB_ID",
                shard_properties: [
                    "shard.method=DB_ID\\nshard.instance=0\\nshard.count=2",
                    "shard.method=DB_ID\\nshard.instance=1\\nshard.count=2",
                ],
            },
            ShardingMethod::DbIdRange => ShardLayout {
                method: "DB_ID_RANGE",
                shard_properties: [
                    "shard.method=DB_ID_RANGE\\nshard.instance=0\\nshard.range=0-799",
                    "shard.method=DB_ID_RANGE\\nshard.instance=1\\nshard.range=800-100000",
                ],
            },
            ShardingMethod::Date => ShardLayout {
                method: "DATE",
                shard_properties: [
                    concat!(
                        "shard.method=DATE\\nshard.instance=0\\nshard.count=2",
                        "\\nshard.key=cm:created\\nshard.date.grouping=6",
                    ),
                    concat!(
                        "shard.method=DATE\\nshard.instance=1\\nshard.count=2",
                        "\\nshard.key=cm:created\\nshard.date.grouping=6",
                    ),
                ],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compose_scaffolder::AnswerValue;
    use pretty_assertions::assert_eq;

    fn answers(pairs: &[(&str, AnswerValue)]) -> Answers {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn test_edition_defaults_to_enterprise() {
        assert_eq!(
            Edition::from_answers(&answers(&[(ALFRESCO_VERSION, "community".into())])),
            Edition::Community
        );
        assert_eq!(
            Edition::from_answers(&answers(&[(ALFRESCO_VERSION, "enterprise".into())])),
            Edition::Enterprise
        );
        assert_eq!(
            Edition::from_answers(&answers(&[(ALFRESCO_VERSION, "Community".into())])),
            Edition::Enterprise
        );
        assert_eq!(Edition::from_answers(&Answers::new()), Edition::Enterprise);
    }

    #[test]
    fn test_http_mode_defaults_to_http() {
        assert_eq!(
            HttpMode::from_answers(&answers(&[(HTTP_MODE, "https".into())])),
            HttpMode::Https
        );
        assert_eq!(
            HttpMode::from_answers(&answers(&[(HTTP_MODE, "HTTPS".into())])),
            HttpMode::Http
        );
        assert_eq!(HttpMode::from_answers(&Answers::new()), HttpMode::Http);
    }

    #[test]
    fn test_transport_table() {
        assert_eq!(
            HttpMode::Http.transport(),
            Transport {
                secure_comms: "none",
                protocol: "http",
                port: "8080"
            }
        );
        assert_eq!(
            HttpMode::Https.transport(),
            Transport {
                secure_comms: "https",
                protocol: "https",
                port: "8443"
            }
        );
    }

    #[test]
    fn test_search_distribution_table() {
        let image = |edition, engine| search_distribution(edition, engine).image;

        assert_eq!(
            image(Edition::Community, SearchEngine::SearchServices),
            "alfresco/alfresco-search-services"
        );
        assert_eq!(
            image(Edition::Community, SearchEngine::InsightEngine),
            "alfresco/alfresco-search-services"
        );
        assert_eq!(
            image(Edition::Enterprise, SearchEngine::SearchServices),
            "quay.io/alfresco/search-services"
        );
        assert_eq!(
            search_distribution(Edition::Enterprise, SearchEngine::InsightEngine),
            SearchDistribution {
                image: "quay.io/alfresco/insight-engine",
                tag_variable: "SEARCH_TAG",
                path: "alfresco-insight-engine",
            }
        );
    }

    #[test]
    fn test_auxiliary_search_image_ignores_edition() {
        assert_eq!(
            auxiliary_search_image(SearchEngine::SearchServices).image,
            "alfresco/alfresco-search-services"
        );
        assert_eq!(
            auxiliary_search_image(SearchEngine::InsightEngine),
            INSIGHT_ENGINE_SEARCH
        );
    }

    #[test]
    fn test_solr_host() {
        assert_eq!(solr_host(true), "solr6slave");
        assert_eq!(solr_host(false), "solr6");
    }

    #[test]
    fn test_sharding_method_fallback() {
        assert_eq!(ShardingMethod::from_answers(&Answers::new()), ShardingMethod::DbId);
        assert_eq!(
            ShardingMethod::from_answers(&answers(&[(SHARDING_METHOD, "DATE".into())])),
            ShardingMethod::Date
        );
        assert_eq!(
            ShardingMethod::from_answers(&answers(&[(SHARDING_METHOD, "PROPERTY".into())])),
            ShardingMethod::DbId
        );
    }

    #[test]
    fn test_range_layout_covers_both_shards() {
        let layout = ShardingMethod::DbIdRange.layout();
        assert_eq!(layout.method, "DB_ID_RANGE");
        assert!(layout.shard_properties[0].ends_with("shard.range=0-799"));
        assert!(layout.shard_properties[1].ends_with("shard.range=800-100000"));
        assert!(!layout.shard_properties[0].contains("shard.count"));
    }

    #[test]
    fn test_every_layout_names_its_instance() {
        for method in [
            ShardingMethod::DbId,
            ShardingMethod::DbIdRange,
            ShardingMethod::Date,
        ] {
            let layout = method.layout();
            for (instance, properties) in layout.shard_properties.iter().enumerate() {
                assert!(properties.starts_with(&format!("shard.method={}", layout.method)));
                assert!(properties.contains(&format!("shard.instance={}", instance)));
            }
        }
    }
}
