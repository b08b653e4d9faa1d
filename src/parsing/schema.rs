//! Output schemas sent along with each completion request.

use serde_json::{json, Value};

/// Schema of a [`StructuredRecipe`](crate::model::StructuredRecipe) response.
pub fn structured_recipe_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "recipeName": {
                "type": "string",
                "description": "The name of the recipe."
            },
            "prepTime": {
                "type": "string",
                "description": "Preparation time such as '15 minutes'. 'Not specified' when absent."
            },
            "cookTime": {
                "type": "string",
                "description": "Cooking time such as '1 hour'. 'Not specified' when absent."
            },
            "servings": {
                "type": "string",
                "description": "Number of servings, e.g. '4' or '6-8'. '4' when absent."
            },
            "instructions": {
                "type": "string",
                "description": "All steps in one string, separated by line breaks."
            },
            "ingredients": {
                "type": "array",
                "description": "Ingredients split into name, quantity and preparation notes.",
                "items": {
                    "type": "object",
                    "properties": {
                        "cleanName": {
                            "type": "string",
                            "description": "Ingredient name only, without amounts or units."
                        },
                        "quantity": {
                            "type": "string",
                            "description": "Amount with its unit, e.g. '100g', '2 cups', '3 cloves'."
                        },
                        "notes": {
                            "type": "string",
                            "description": "Optional preparation notes, e.g. 'diced'."
                        }
                    },
                    "required": ["cleanName", "quantity"]
                }
            }
        },
        "required": ["recipeName", "prepTime", "cookTime", "servings", "instructions", "ingredients"]
    })
}

/// Schema of a [`LegacyRecipe`](crate::model::LegacyRecipe) response.
pub fn legacy_recipe_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "recipeName": {"type": "string"},
            "prepTime": {"type": "string"},
            "cookTime": {"type": "string"},
            "servings": {
                "type": "number",
                "description": "Number of servings. 4 when absent."
            },
            "cleanIngredientNames": {
                "type": "array",
                "description": "Ingredient names without amounts, units or preparation words.",
                "items": {"type": "string"}
            },
            "instructions": {
                "type": "array",
                "description": "Steps in order, amounts kept as written.",
                "items": {"type": "string"}
            }
        },
        "required": ["recipeName", "prepTime", "cookTime", "servings", "cleanIngredientNames", "instructions"]
    })
}
