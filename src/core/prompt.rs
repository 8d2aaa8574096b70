use crate::domain::locale::Locale;
use serde_json::{json, Value};

const TEXT_START: &str = "<<<TEXT";
const TEXT_END: &str = "TEXT>>>";

const MODULES: &[&str] = &[
    "Lexical diversity",
    "Syntactic uniformity",
    "Discourse markers and stock phrases",
    "Citation and source handling",
    "Argumentative depth",
    "Stylistic consistency",
];

const FALSE_POSITIVE_FACTORS: &[&str] = &[
    "Non-native author",
    "Highly formulaic genre (abstract, methods)",
    "Heavy editing or proofreading tools",
    "Very short sample",
];

fn answer_language(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "English",
        Locale::Es => "Spanish",
    }
}

/// Build the instruction prompt for one analysis request.
pub fn build_prompt(text: &str, locale: Locale) -> String {
    let mut out = String::with_capacity(text.len() + 2048);

    out.push_str(
        "You are a forensic linguist who evaluates whether academic writing was produced by a \
         generative AI model. Analyse the text between the delimiters and estimate the \
         probability (0-100) that it was AI-generated.\n\n",
    );

    out.push_str("Score the text through these analysis modules, in this order:\n");
    for (i, module) in MODULES.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, module));
    }

    out.push_str(
        "\nFor every module give a score from 0 to 10, a signed percentage contribution to the \
         final probability (for example \"+12%\" or \"-4%\"), a one-line finding for the table \
         and a longer analysis for the details section. Use the same module names in \
         moduleTable and moduleDetails.\n",
    );

    out.push_str(
        "\nQuote up to five short excerpts as top evidences, each with the indicator it shows \
         and its signed percentage impact.\n",
    );

    out.push_str("\nEvaluate these false-positive factors and mark each as applied or not:\n");
    for factor in FALSE_POSITIVE_FACTORS {
        out.push_str("- ");
        out.push_str(factor);
        out.push('\n');
    }

    out.push_str(
        "\nShow the final calculation that combines the contributions and corrections into the \
         probability, then give a practical recommendation for the reviewer. The verdict is a \
         short upper-case label such as \"PROBABLE AI\" or \"PROBABLE HUMAN\". Confidence is \
         one of LOW, MEDIUM or HIGH.\n",
    );

    out.push_str(&format!(
        "\nWrite every free-text field in {}. Respond with JSON only, matching the response \
         schema. Do not wrap it in Markdown.\n\n",
        answer_language(locale)
    ));

    out.push_str(TEXT_START);
    out.push('\n');
    out.push_str(text);
    out.push('\n');
    out.push_str(TEXT_END);
    out.push('\n');

    out
}

fn string_prop() -> Value {
    json!({ "type": "STRING" })
}

fn number_prop() -> Value {
    json!({ "type": "NUMBER" })
}

fn object_schema(fields: &[(&str, Value)]) -> Value {
    let properties: serde_json::Map<String, Value> = fields
        .iter()
        .map(|(name, schema)| (name.to_string(), schema.clone()))
        .collect();
    let required: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();

    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required,
    })
}

fn array_of(item: Value) -> Value {
    json!({ "type": "ARRAY", "items": item })
}

/// OpenAPI-style schema of `AnalysisResult` for `generationConfig.responseSchema`.
pub fn response_schema() -> Value {
    let main_result = object_schema(&[
        ("probability", number_prop()),
        ("verdict", string_prop()),
        (
            "confidence",
            json!({ "type": "STRING", "enum": ["LOW", "MEDIUM", "HIGH"] }),
        ),
    ]);

    let module_row = object_schema(&[
        ("module", string_prop()),
        ("score", number_prop()),
        ("contribution", string_prop()),
        ("finding", string_prop()),
    ]);

    let module_detail = object_schema(&[
        ("module", string_prop()),
        ("score", number_prop()),
        ("contribution", string_prop()),
        ("analysis", string_prop()),
    ]);

    let evidence = object_schema(&[
        ("quote", string_prop()),
        ("indicator", string_prop()),
        ("impact", string_prop()),
    ]);

    let false_positive = object_schema(&[
        ("factor", string_prop()),
        ("applied", json!({ "type": "BOOLEAN" })),
        ("correction", string_prop()),
    ]);

    object_schema(&[
        ("mainResult", main_result),
        ("justification", string_prop()),
        ("moduleTable", array_of(module_row)),
        ("moduleDetails", array_of(module_detail)),
        ("topEvidences", array_of(evidence)),
        ("falsePositives", array_of(false_positive)),
        ("finalCalculation", string_prop()),
        ("recommendation", string_prop()),
    ])
}
