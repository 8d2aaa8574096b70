pub use crate::domain::locale::Locale;

/// User-facing strings for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub empty_input: &'static str,
    pub analysis_failed: &'static str,
    pub error_prefix: &'static str,
    pub analyzing: &'static str,
    pub config_title: &'static str,
    pub config_body: &'static str,
    pub config_action: &'static str,
    pub config_steps: &'static [&'static str],
    pub probability: &'static str,
    pub verdict: &'static str,
    pub confidence: &'static str,
    pub justification: &'static str,
    pub module_table: &'static str,
    pub module_details: &'static str,
    pub top_evidences: &'static str,
    pub false_positives: &'static str,
    pub final_calculation: &'static str,
    pub recommendation: &'static str,
    pub applied_yes: &'static str,
    pub applied_no: &'static str,
}

static EN: Messages = Messages {
    empty_input: "Please enter text to analyze.",
    analysis_failed: "An error occurred while analyzing the text. Please try again.",
    error_prefix: "Error:",
    analyzing: "Analyzing...",
    config_title: "Configuration Error",
    config_body: "The application could not find the Google Gemini API key it needs to run.",
    config_action: "Action required:",
    config_steps: &[
        "Create a Gemini API key.",
        "Export it as the API_KEY environment variable, or pass --api-key.",
        "Alternatively set service.api_key in the file given to --config.",
        "Run the command again.",
    ],
    probability: "AI probability",
    verdict: "Verdict",
    confidence: "Confidence",
    justification: "Justification",
    module_table: "Module summary",
    module_details: "Module details",
    top_evidences: "Top evidences",
    false_positives: "False-positive checks",
    final_calculation: "Final calculation",
    recommendation: "Recommendation",
    applied_yes: "Yes",
    applied_no: "No",
};

static ES: Messages = Messages {
    empty_input: "Por favor, introduce texto para analizar.",
    analysis_failed: "Ocurrió un error al analizar el texto. Por favor, inténtalo de nuevo.",
    error_prefix: "Error:",
    analyzing: "Analizando...",
    config_title: "Error de Configuración",
    config_body:
        "La aplicación no pudo encontrar la clave de API de Google Gemini necesaria para funcionar.",
    config_action: "Acción requerida:",
    config_steps: &[
        "Crea una clave de API de Gemini.",
        "Expórtala como la variable de entorno API_KEY, o usa --api-key.",
        "También puedes definir service.api_key en el archivo indicado con --config.",
        "Vuelve a ejecutar el comando.",
    ],
    probability: "Probabilidad de IA",
    verdict: "Veredicto",
    confidence: "Confianza",
    justification: "Justificación",
    module_table: "Resumen por módulo",
    module_details: "Detalle por módulo",
    top_evidences: "Evidencias principales",
    false_positives: "Verificación de falsos positivos",
    final_calculation: "Cálculo final",
    recommendation: "Recomendación",
    applied_yes: "Sí",
    applied_no: "No",
};

impl Messages {
    pub fn for_locale(locale: Locale) -> &'static Messages {
        match locale {
            Locale::En => &EN,
            Locale::Es => &ES,
        }
    }
}
