use std::sync::{Arc, LazyLock};

use asdl_core::Grammar;
use asdl_transition::TransitionError;

use crate::{LangEntry, Registry, System};

macro_rules! define_langs {
    (
        $(
            $fn_name:ident => {
                feature: $feature:literal,
                name: $name:literal,
                system: $system:ty,
                names: [$($alias:literal),* $(,)?] $(,)?
            }
        ),* $(,)?
    ) => {
        // One factory per language
        $(
            #[cfg(feature = $feature)]
            pub fn $fn_name(grammar: Grammar) -> System {
                Arc::new(<$system>::new(grammar))
            }
        )*

        /// Registry of the languages enabled at compile time.
        pub fn builtin() -> &'static Registry {
            static REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
                #[allow(unused_mut)]
                let mut registry = Registry::new();
                $(
                    #[cfg(feature = $feature)]
                    registry.register($name, &[$($alias),*], $fn_name);
                )*
                registry
            });
            &REGISTRY
        }
    };
}

define_langs! {
    asdl => {
        feature: "lang-asdl",
        name: "asdl",
        system: asdl_transition::AsdlTransitionSystem,
        names: ["generic", "sexp"],
    },
    lambda_dcs => {
        feature: "lang-lambda-dcs",
        name: "lambda_dcs",
        system: crate::lambda_dcs::LambdaCalculusTransitionSystem,
        names: ["lambda"],
    },
}

/// Build the built-in transition system for `lang` over `grammar`.
pub fn create(lang: &str, grammar: Grammar) -> Result<System, TransitionError> {
    builtin().create(lang, grammar)
}

pub fn from_name(lang: &str) -> Option<&'static LangEntry> {
    builtin().lookup(lang)
}

pub fn all() -> Vec<&'static str> {
    builtin().names().collect()
}
