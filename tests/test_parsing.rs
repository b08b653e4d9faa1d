use async_trait::async_trait;
use recipe_import::providers::{CompletionRequest, CompletionResponse, LlmProvider, ProviderError};
use recipe_import::{ErrorKind, LegacyParser, StructuredParser};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Completion stub returning a canned payload and counting requests.
struct CannedProvider {
    payload: String,
    calls: AtomicUsize,
}

impl CannedProvider {
    fn new(payload: &str) -> Arc<Self> {
        Arc::new(CannedProvider {
            payload: payload.to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for CannedProvider {
    fn provider_name(&self) -> &str {
        "canned"
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<CompletionResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(CompletionResponse::new(self.payload.clone()))
    }
}

const BISCUITS: &str = "Buttermilk biscuits

2 1/4 cups all-purpose flour
1 tablespoon baking powder
1 teaspoon salt
115g cold butter, cubed
1 cup buttermilk

Whisk the dry ingredients, cut in the butter, stir in the buttermilk.
Bake at 220C for 12 minutes.";

#[tokio::test]
async fn test_dropped_flour_quantity_is_recovered() {
    let provider = CannedProvider::new(
        r#"{
            "recipeName": "Buttermilk biscuits",
            "prepTime": "10 minutes",
            "cookTime": "12 minutes",
            "servings": "8",
            "instructions": "Whisk the dry ingredients.\nCut in the butter.\nBake.",
            "ingredients": [
                {"cleanName": "flour", "quantity": "", "notes": "all-purpose"},
                {"cleanName": "butter", "quantity": "115g", "notes": "cold, cubed"}
            ]
        }"#,
    );
    let parser = StructuredParser::new(provider.clone());

    let recipe = parser.parse(BISCUITS).await.unwrap();

    let flour = &recipe.ingredients[0];
    assert!(flour.quantity.contains('2'), "got {:?}", flour.quantity);
    assert!(flour.quantity.contains("cup"), "got {:?}", flour.quantity);
    assert_eq!(flour.notes.as_deref(), Some("all-purpose"));
    assert_eq!(recipe.ingredients[1].quantity, "115g");
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_mass_unit_survives_parse() {
    let provider = CannedProvider::new(
        r#"```json
        {
            "recipeName": "Ciorbă de pui",
            "instructions": "Fierbe carnea.",
            "ingredients": [{"cleanName": "Carne de pui", "quantity": " 700g "}]
        }
        ```"#,
    );
    let parser = StructuredParser::new(provider);

    let recipe = parser.parse("Ciorbă de pui\n700g carne de pui").await.unwrap();

    let chicken = &recipe.ingredients[0];
    assert_eq!(chicken.quantity, "700g");
    assert_eq!(chicken.clean_name, "carne de pui");
    assert!(!chicken.clean_name.chars().any(|c| c.is_ascii_digit()));
    assert_eq!(recipe.prep_time, "Not specified");
    assert_eq!(recipe.servings, "4");
}

#[tokio::test]
async fn test_empty_input_makes_no_request() {
    let provider = CannedProvider::new("{}");

    let structured = StructuredParser::new(provider.clone()).parse("").await;
    let legacy = LegacyParser::new(provider.clone()).parse("   ").await;

    assert_eq!(structured.unwrap_err().kind(), ErrorKind::EmptyInput);
    assert_eq!(legacy.unwrap_err().kind(), ErrorKind::EmptyInput);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_non_json_response_is_decode_error() {
    let provider = CannedProvider::new("not json");

    let structured = StructuredParser::new(provider.clone()).parse("2 eggs").await;
    let legacy = LegacyParser::new(provider.clone()).parse("2 eggs").await;

    assert_eq!(structured.unwrap_err().kind(), ErrorKind::DecodeError);
    assert_eq!(legacy.unwrap_err().kind(), ErrorKind::DecodeError);
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn test_missing_fields_are_named() {
    let provider = CannedProvider::new(r#"{"recipeName": "Soup"}"#);

    let err = StructuredParser::new(provider.clone())
        .parse("Soup")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingFields);
    assert!(err.to_string().contains("ingredients"));
    assert!(err.to_string().contains("instructions"));

    let err = LegacyParser::new(provider).parse("Soup").await.unwrap_err();
    assert!(err.to_string().contains("cleanIngredientNames"));
}

#[tokio::test]
async fn test_legacy_parse_flattens_names() {
    let provider = CannedProvider::new(
        r#"{
            "recipeName": "Pancakes",
            "servings": 3,
            "cleanIngredientNames": ["Flour", " Milk ", ""],
            "instructions": ["Mix everything.", "Fry in a pan."]
        }"#,
    );

    let recipe = LegacyParser::new(provider).parse(BISCUITS).await.unwrap();

    assert_eq!(recipe.clean_ingredient_names, vec!["flour", "milk"]);
    assert_eq!(recipe.servings, 3);
    assert_eq!(recipe.cook_time, "Not specified");
    assert_eq!(recipe.instructions.len(), 2);
}
