//! Signature rendering for callable members.
//!
//! A callable is rendered from its original (unwrapped) definition: the
//! receiver is dropped, defaults are suppressed and every annotation is
//! normalized into declaration-friendly text.

use std::sync::LazyLock;

use regex::Regex;
use stubgen_manifest::{Annotation, BUILTINS_MODULE, CallableDef, ParamDef, ParamKind};

use crate::{
    StubError,
    builder::{CodeFragment, Renderable},
};

/// Receiver names accepted as the first parameter.
pub const RECEIVER_NAMES: [&str; 2] = ["self", "cls"];

const TYPING_QUALIFIER: &str = "typing.";

static FORWARD_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"ForwardRef\((['"].+?['"])\)"#).expect("forward reference pattern is valid")
});

/// Renders annotations relative to the module of the class being stubbed.
#[derive(Debug, Clone, Copy)]
pub struct AnnotationFormatter<'a> {
    base_module: &'a str,
}

impl<'a> AnnotationFormatter<'a> {
    pub fn new(base_module: &'a str) -> Self {
        Self { base_module }
    }

    /// Render an annotation.
    ///
    /// - `typing` constructs lose every `typing.` qualifier
    /// - classes from `builtins` or the base module render bare, others as
    ///   `module.qualname`
    /// - anything else keeps its text
    ///
    /// `ForwardRef('X')` then collapses to `'X'` and `NoneType` to `None`.
    pub fn format(&self, annotation: &Annotation) -> String {
        let text = match annotation {
            Annotation::Typing { typing } => typing.replace(TYPING_QUALIFIER, ""),
            Annotation::Class { qualname, module } => {
                if module == BUILTINS_MODULE || module == self.base_module {
                    qualname.clone()
                } else {
                    format!("{module}.{qualname}")
                }
            }
            Annotation::Repr(text) => text.clone(),
        };

        FORWARD_REF
            .replace_all(&text, "$1")
            .replace("NoneType", "None")
    }
}

/// A rendered `def` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionStub {
    /// Member name the function is declared under
    pub name: String,
    /// Parameter list including parentheses, e.g. `(a, b: int)`
    pub params: String,
    /// Rendered return annotation
    pub returns: Option<String>,
    /// Docstring of the original callable
    pub doc: Option<String>,
}

impl FunctionStub {
    /// Render a callable member declared as `name`.
    ///
    /// Fails with [`StubError::MalformedBinding`] when the original callable's
    /// first positional parameter is not `self` or `cls`.
    pub fn render(name: &str, def: &CallableDef, base_module: &str) -> Result<Self, StubError> {
        let original = def.unwrap_original();
        let formatter = AnnotationFormatter::new(base_module);

        let params = format_params(name, &original.params, &formatter)?;
        let returns = original.returns.as_ref().map(|a| formatter.format(a));

        Ok(Self {
            name: name.to_string(),
            params,
            returns,
            doc: original.doc.clone(),
        })
    }

    /// The `def` header line.
    pub fn header(&self) -> String {
        match &self.returns {
            Some(returns) => format!("def {}{} -> {}:", self.name, self.params, returns),
            None => format!("def {}{}:", self.name, self.params),
        }
    }

    /// The docstring body line. An absent docstring renders empty.
    ///
    /// The literal evaluates back to the docstring text: backslashes are
    /// doubled, and quotes that would close the literal early are escaped.
    pub fn docstring(&self) -> String {
        let doc = self.doc.as_deref().unwrap_or_default();
        let body = doc.trim_end_matches('\'');
        let trailing_quotes = doc.len() - body.len();

        let escaped = body.replace('\\', r"\\").replace("'''", r"\'\'\'");
        format!("'''{}{}'''", escaped, r"\'".repeat(trailing_quotes))
    }
}

impl Renderable for FunctionStub {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::block(
            self.header(),
            vec![CodeFragment::line(self.docstring())],
        )]
    }
}

/// Format a parameter list the way an argspec is printed, minus the
/// receiver and defaults: positional parameters, `*args` (or a bare `*`
/// before keyword-only parameters), keyword-only parameters, `**kwargs`.
fn format_params(
    member: &str,
    params: &[ParamDef],
    formatter: &AnnotationFormatter<'_>,
) -> Result<String, StubError> {
    let mut positional = params.iter().filter(|p| p.kind.is_positional());

    let receiver = positional.next();
    match receiver {
        Some(param) if RECEIVER_NAMES.contains(&param.name.as_str()) => {}
        _ => {
            return Err(StubError::MalformedBinding {
                member: member.to_string(),
                found: receiver.map(|p| p.name.clone()),
            });
        }
    }

    let var_positional = of_kind(params, ParamKind::VarPositional).next();
    let var_keyword = of_kind(params, ParamKind::VarKeyword).next();
    let keyword_only: Vec<&ParamDef> = of_kind(params, ParamKind::KeywordOnly).collect();

    let mut specs: Vec<String> = positional.map(|p| format_param(p, formatter)).collect();

    match var_positional {
        Some(p) => specs.push(format!("*{}", format_param(p, formatter))),
        None if !keyword_only.is_empty() => specs.push("*".to_string()),
        None => {}
    }

    specs.extend(keyword_only.iter().map(|p| format_param(p, formatter)));

    if let Some(p) = var_keyword {
        specs.push(format!("**{}", format_param(p, formatter)));
    }

    Ok(format!("({})", specs.join(", ")))
}

fn of_kind(params: &[ParamDef], kind: ParamKind) -> impl Iterator<Item = &ParamDef> {
    params.iter().filter(move |p| p.kind == kind)
}

fn format_param(param: &ParamDef, formatter: &AnnotationFormatter<'_>) -> String {
    match &param.annotation {
        Some(annotation) => format!("{}: {}", param.name, formatter.format(annotation)),
        None => param.name.clone(),
    }
}
