//! Calculation categories and their fixed system instructions.

use std::fmt;
use std::str::FromStr;

pub const BASICO_PROMPT: &str = "Você é um assistente de matemática básica. Calcule expressões aritméticas simples. Retorne apenas o resultado numérico final, sem explicações.";

pub const ALGEBRA_PROMPT: &str = "Você é um assistente de álgebra. Resolva equações, simplifique expressões algébricas e trabalhe com variáveis. Se resolver uma equação, retorne a solução no formato 'x = valor'. Se simplificar, retorne a expressão simplificada. Sem passos, apenas o resultado final.";

pub const CALCULO_PROMPT: &str = "Você é um assistente de cálculo. Calcule derivadas, integrais e limites. Use notação matemática padrão. Para integrais indefinidas, inclua '+ C'. Retorne apenas o resultado final, sem passos.";

pub const GEOMETRIA_PROMPT: &str = "Você é um assistente de geometria. Calcule áreas, perímetros, volumes e outras medidas geométricas usando as fórmulas apropriadas. Inclua unidades quando fornecidas. Se faltarem dados essenciais, responda 'Dados insuficientes'. Retorne apenas o valor final com unidade.";

pub const ESTATISTICA_PROMPT: &str = "Você é um assistente de estatística. Calcule médias, medianas, desvio padrão, probabilidades e outras medidas estatísticas. Para listas numéricas use formato (1,2,3). Arredonde resultados para 4 casas decimais quando necessário. Retorne apenas o valor final.";

/// Kind of calculation a question belongs to.
///
/// | Key | Instruction focus |
/// |-----|-------------------|
/// | `basico` | Plain arithmetic, numeric result only |
/// | `algebra` | Equations and simplification, `x = valor` |
/// | `calculo` | Derivatives, integrals, limits (`+ C` on indefinite integrals) |
/// | `geometria` | Areas, perimeters, volumes with units |
/// | `estatistica` | Means, medians, deviation, probability (4 decimals) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Basico,
    Algebra,
    Calculo,
    Geometria,
    Estatistica,
}

impl Category {
    /// All categories in registration order.
    pub const ALL: [Category; 5] = [
        Category::Basico,
        Category::Algebra,
        Category::Calculo,
        Category::Geometria,
        Category::Estatistica,
    ];

    /// Returns the wire key for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Basico => "basico",
            Category::Algebra => "algebra",
            Category::Calculo => "calculo",
            Category::Geometria => "geometria",
            Category::Estatistica => "estatistica",
        }
    }

    fn default_instruction(&self) -> &'static str {
        match self {
            Category::Basico => BASICO_PROMPT,
            Category::Algebra => ALGEBRA_PROMPT,
            Category::Calculo => CALCULO_PROMPT,
            Category::Geometria => GEOMETRIA_PROMPT,
            Category::Estatistica => ESTATISTICA_PROMPT,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category key that is not registered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Parses a category key, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == key)
            .ok_or(UnknownCategory(key))
    }
}

/// A system instruction bound to one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pub category: Category,
    pub instruction: &'static str,
}

/// Immutable lookup table from category key to system instruction.
///
/// Built once at startup and shared read-only for the process lifetime.
#[derive(Debug, Clone)]
pub struct PromptRegistry {
    templates: Vec<PromptTemplate>,
}

impl PromptRegistry {
    /// Creates the registry with the five built-in templates.
    pub fn with_defaults() -> Self {
        let templates = Category::ALL
            .into_iter()
            .map(|category| PromptTemplate {
                category,
                instruction: category.default_instruction(),
            })
            .collect();
        Self { templates }
    }

    /// Looks up a template by category key. The key must already be lowercase.
    pub fn get(&self, key: &str) -> Option<&PromptTemplate> {
        self.templates.iter().find(|t| t.category.as_str() == key)
    }

    /// Returns the instruction registered for a category key.
    pub fn instruction_for(&self, key: &str) -> Option<&'static str> {
        self.get(key).map(|t| t.instruction)
    }

    /// Registered keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.templates.iter().map(|t| t.category.as_str())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for PromptRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_has_five_keys_in_order() {
        let registry = PromptRegistry::with_defaults();
        let keys: Vec<_> = registry.keys().collect();
        assert_eq!(keys, ["basico", "algebra", "calculo", "geometria", "estatistica"]);
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn instruction_lookup() {
        let registry = PromptRegistry::with_defaults();
        assert_eq!(registry.instruction_for("algebra"), Some(ALGEBRA_PROMPT));
        assert!(registry.instruction_for("calculo").unwrap().contains("+ C"));
        assert!(registry
            .instruction_for("geometria")
            .unwrap()
            .contains("Dados insuficientes"));
        assert_eq!(registry.instruction_for("trigonometria"), None);
        // lookups are exact; callers lowercase first
        assert_eq!(registry.instruction_for("ALGEBRA"), None);
    }

    #[test]
    fn category_parse_ignores_case() {
        assert_eq!("ALGEBRA".parse::<Category>(), Ok(Category::Algebra));
        assert_eq!("Estatistica".parse::<Category>(), Ok(Category::Estatistica));
        assert_eq!(
            "Trigonometria".parse::<Category>(),
            Err(UnknownCategory("trigonometria".into()))
        );
    }

    #[test]
    fn display_matches_key() {
        for category in Category::ALL {
            assert_eq!(category.to_string(), category.as_str());
        }
    }
}
