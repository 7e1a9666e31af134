//! Questions command implementation

use crate::api::AnalyticsApi;
use crate::cli::output::{format_questions_json, format_questions_table};
use crate::cli::QuestionsArgs;

/// Handle `pethotel-chat questions` command
pub async fn handle_questions(
    args: &QuestionsArgs,
    api: &dyn AnalyticsApi,
) -> Result<String, Box<dyn std::error::Error>> {
    let catalog = api.list_questions().await?;

    if args.json {
        Ok(format_questions_json(&catalog)?)
    } else {
        Ok(format_questions_table(&catalog))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::ScriptedApi;
    use crate::api::QuestionCatalog;

    #[tokio::test]
    async fn test_questions_table() {
        let api = ScriptedApi::new().with_catalog(QuestionCatalog {
            questions: vec!["Custo das estadias por pet".to_string()],
            query_types: vec!["estadias_por_pet".to_string()],
        });

        let output = handle_questions(&QuestionsArgs::default(), &api)
            .await
            .unwrap();
        assert!(output.contains("Custo das estadias por pet"));
    }

    #[tokio::test]
    async fn test_questions_unreachable_api_is_an_error() {
        let api = ScriptedApi::new();
        assert!(handle_questions(&QuestionsArgs::default(), &api)
            .await
            .is_err());
    }
}
