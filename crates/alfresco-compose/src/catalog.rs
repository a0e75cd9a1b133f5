//! Artifact rules for an Alfresco + Search deployment

use crate::questions::{ACS_VERSION, DEFAULT_ACS_VERSION, REPLICATION, SHARDING, ZEPPELIN};
use crate::tables::{
    auxiliary_search_image, search_distribution, solr_host, Edition, HttpMode, SearchEngine,
    ShardingMethod,
};
use compose_scaffolder::{Answers, ArtifactCatalog, ArtifactDirective, Substitutions};

/// Rules in output order: compose file, environment, images, keystores, topology extras
pub fn catalog() -> ArtifactCatalog {
    ArtifactCatalog::new()
        .always("docker-compose", compose_file)
        .always("env", env_file)
        .rule("alfresco-https", https, alfresco_https)
        .rule("search-https", search_https_applies, search_https)
        .rule("zeppelin-https", zeppelin_https_applies, zeppelin_https)
        .rule("keystores-alfresco", https, |_| {
            ArtifactDirective::raw_copy("keystores/alfresco", "keystores/alfresco")
        })
        .rule("keystores-solr", https, |_| {
            ArtifactDirective::raw_copy("keystores/solr", "keystores/solr")
        })
        .rule("keystores-zeppelin", zeppelin_https_applies, |_| {
            ArtifactDirective::raw_copy("keystores/zeppelin", "keystores/zeppelin")
        })
        .rule("replication", |a| a.flag(REPLICATION), replication)
        .rule("sharding", |a| a.flag(SHARDING), sharding)
}

/// Template id inside the bundle directory for the chosen ACS version
fn versioned(answers: &Answers, name: &str) -> String {
    let version = answers.text(ACS_VERSION).unwrap_or(DEFAULT_ACS_VERSION);
    format!("{}/{}", version, name)
}

fn https(answers: &Answers) -> bool {
    HttpMode::from_answers(answers) == HttpMode::Https
}

fn search_https_applies(answers: &Answers) -> bool {
    https(answers) && !answers.flag(SHARDING)
}

fn zeppelin_https_applies(answers: &Answers) -> bool {
    https(answers) && answers.flag(ZEPPELIN)
}

/// Substitutions for images built on top of the search image
fn auxiliary_search_substitutions(answers: &Answers) -> Substitutions {
    let search = auxiliary_search_image(SearchEngine::from_answers(answers));
    Substitutions::new()
        .with("searchImage", search.image)
        .with("searchPath", search.path)
}

fn compose_file(answers: &Answers) -> ArtifactDirective {
    let edition = Edition::from_answers(answers);
    let mode = HttpMode::from_answers(answers);
    let transport = mode.transport();
    let search = search_distribution(edition, SearchEngine::from_answers(answers));
    let replication = answers.flag(REPLICATION);

    let mut subs = Substitutions::new()
        .with("httpMode", mode.as_str())
        .with("secureComms", transport.secure_comms)
        .with("alfrescoProtocol", transport.protocol)
        .with("alfrescoPort", transport.port)
        .with("searchImage", search.image)
        .with("searchTag", search.tag_variable)
        .with("searchPath", search.path)
        .with_flag("replication", replication)
        .with("searchSolrHost", solr_host(replication));

    if edition == Edition::Enterprise {
        subs = subs
            .with_flag("zeppelin", answers.flag(ZEPPELIN))
            .with_flag("sharding", answers.flag(SHARDING));
    }

    let template = format!("docker-compose-{}.yml", edition.compose_suffix());
    ArtifactDirective::render(versioned(answers, &template), "docker-compose.yml", subs)
}

fn env_file(answers: &Answers) -> ArtifactDirective {
    ArtifactDirective::raw_copy(versioned(answers, ".env"), ".env")
}

fn alfresco_https(answers: &Answers) -> ArtifactDirective {
    let subs = Substitutions::new().with(
        "acsImage",
        Edition::from_answers(answers).repository_image(),
    );
    ArtifactDirective::render(versioned(answers, "alfresco-https"), "alfresco-https", subs)
}

fn search_https(answers: &Answers) -> ArtifactDirective {
    ArtifactDirective::render(
        versioned(answers, "search-https"),
        "search-https",
        auxiliary_search_substitutions(answers),
    )
}

fn zeppelin_https(answers: &Answers) -> ArtifactDirective {
    ArtifactDirective::raw_copy(versioned(answers, "zeppelin-https"), "zeppelin-https")
}

fn replication(answers: &Answers) -> ArtifactDirective {
    ArtifactDirective::render(
        versioned(answers, "replication-none"),
        "replication-none",
        auxiliary_search_substitutions(answers),
    )
}

fn sharding(answers: &Answers) -> ArtifactDirective {
    let name = format!("sharding-{}", HttpMode::from_answers(answers).transport().secure_comms);
    let layout = ShardingMethod::from_answers(answers).layout();
    let search = search_distribution(
        Edition::from_answers(answers),
        SearchEngine::from_answers(answers),
    );

    let subs = Substitutions::new()
        .with("searchImage", search.image)
        .with("searchPath", search.path)
        .with("shardMethod", layout.method)
        .with("shard0Properties", layout.shard_properties[0])
        .with("shard1Properties", layout.shard_properties[1]);

    ArtifactDirective::render(versioned(answers, &name), name, subs)
}
