//! Questions asked when generating an Alfresco + Search deployment

use compose_scaffolder::{Question, When};

pub const ACS_VERSION: &str = "acsVersion";
pub const ALFRESCO_VERSION: &str = "alfrescoVersion";
pub const HTTP_MODE: &str = "httpMode";
pub const REPLICATION: &str = "replication";
pub const INSIGHT_ENGINE: &str = "insightEngine";
pub const ZEPPELIN: &str = "zeppelin";
pub const SHARDING: &str = "sharding";
pub const SHARDING_METHOD: &str = "shardingMethod";

pub const DEFAULT_ACS_VERSION: &str = "6.1";

pub const COMMUNITY: &str = "community";
pub const ENTERPRISE: &str = "enterprise";
pub const HTTP: &str = "http";
pub const HTTPS: &str = "https";

/// The question list, in the order it is asked
pub fn questions() -> Vec<Question> {
    vec![
        Question::text(
            ACS_VERSION,
            "Which Alfresco version do you want to use?",
            DEFAULT_ACS_VERSION,
        ),
        Question::choice(
            ALFRESCO_VERSION,
            "Would you like to use Alfresco enterprise or community?",
            &[COMMUNITY, ENTERPRISE],
            COMMUNITY,
        ),
        Question::choice(
            HTTP_MODE,
            "Would you like to use http or https?",
            &[HTTP, HTTPS],
            HTTP,
        ),
        Question::confirm(
            REPLICATION,
            "Would you like to use SOLR Replication (2 nodes in master-slave)?",
            false,
        )
        .when(When::equals(HTTP_MODE, HTTP)),
        // Enterprise only options
        Question::confirm(
            INSIGHT_ENGINE,
            "Would you like to use Insight Engine instead of Search Services?",
            false,
        )
        .when(When::equals(ALFRESCO_VERSION, ENTERPRISE)),
        Question::confirm(ZEPPELIN, "Would you like to deploy Zeppelin?", false).when(When::all([
            When::equals(ALFRESCO_VERSION, ENTERPRISE),
            When::is_true(INSIGHT_ENGINE),
        ])),
        Question::confirm(
            SHARDING,
            "Would you like to use dynamic Sharding (2 SOLR nodes)?",
            false,
        )
        .when(When::all([
            When::equals(ALFRESCO_VERSION, ENTERPRISE),
            When::is_false(REPLICATION),
        ])),
        Question::choice(
            SHARDING_METHOD,
            "Which sharding method would you like to use?",
            &["DB_ID", "DB_ID_RANGE", "DATE"],
            "DB_ID",
        )
        .when(When::is_true(SHARDING)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use compose_scaffolder::{
        resolve, AnswerValue, Answers, DefaultPrompter, Overrides, QuestionSet,
    };
    use pretty_assertions::assert_eq;

    fn question_set() -> QuestionSet {
        QuestionSet::new(questions()).expect("shipped questions must be valid")
    }

    #[test]
    fn test_shipped_questions_only_reference_earlier_keys() {
        let set = question_set();
        assert_eq!(set.len(), 8);
    }

    #[test]
    fn test_defaults_give_plain_community_deployment() {
        let answers = resolve(&question_set(), &Overrides::new(), &mut DefaultPrompter).unwrap();

        let expected: Answers = [
            (ACS_VERSION, AnswerValue::from(DEFAULT_ACS_VERSION)),
            (ALFRESCO_VERSION, AnswerValue::from(COMMUNITY)),
            (HTTP_MODE, AnswerValue::from(HTTP)),
            (REPLICATION, AnswerValue::Bool(false)),
        ]
        .into_iter()
        .collect();
        assert_eq!(answers, expected);
    }

    #[test]
    fn test_enterprise_defaults_reach_sharding() {
        let overrides: Overrides = [(ALFRESCO_VERSION, ENTERPRISE), (SHARDING, "TRUE")]
            .into_iter()
            .collect();

        let answers = resolve(&question_set(), &overrides, &mut DefaultPrompter).unwrap();

        assert_eq!(
            answers.keys().collect::<Vec<_>>(),
            vec![
                ACS_VERSION,
                ALFRESCO_VERSION,
                HTTP_MODE,
                REPLICATION,
                INSIGHT_ENGINE,
                SHARDING,
                SHARDING_METHOD
            ]
        );
        assert!(answers.flag(SHARDING));
        assert_eq!(answers.text(SHARDING_METHOD), Some("DB_ID"));
    }

    #[test]
    fn test_replication_excludes_sharding_even_when_overridden() {
        let overrides: Overrides = [
            (ALFRESCO_VERSION, "enterprise"),
            (REPLICATION, "true"),
            (SHARDING, "true"),
            (SHARDING_METHOD, "DATE"),
        ]
        .into_iter()
        .collect();

        let answers = resolve(&question_set(), &overrides, &mut DefaultPrompter).unwrap();

        assert!(answers.flag(REPLICATION));
        assert!(!answers.contains(SHARDING));
        assert!(!answers.contains(SHARDING_METHOD));
    }

    #[test]
    fn test_https_skips_replication_and_allows_sharding() {
        let overrides: Overrides = [(ALFRESCO_VERSION, ENTERPRISE), (HTTP_MODE, HTTPS)]
            .into_iter()
            .collect();

        let answers = resolve(&question_set(), &overrides, &mut DefaultPrompter).unwrap();

        assert!(!answers.contains(REPLICATION));
        assert_eq!(answers.get(SHARDING), Some(&AnswerValue::Bool(false)));
    }

    #[test]
    fn test_zeppelin_needs_insight_engine() {
        let without: Overrides = [(ALFRESCO_VERSION, ENTERPRISE), (ZEPPELIN, "true")]
            .into_iter()
            .collect();
        let answers = resolve(&question_set(), &without, &mut DefaultPrompter).unwrap();
        assert!(!answers.contains(ZEPPELIN));

        let with: Overrides = [
            (ALFRESCO_VERSION, ENTERPRISE),
            (INSIGHT_ENGINE, "true"),
            (ZEPPELIN, "true"),
        ]
        .into_iter()
        .collect();
        let answers = resolve(&question_set(), &with, &mut DefaultPrompter).unwrap();
        assert!(answers.flag(ZEPPELIN));
    }
}
