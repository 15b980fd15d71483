//! Class surface parsing and validation.

use std::{collections::HashMap, path::Path, str::FromStr};

use super::{CallableDef, ClassSurface, MemberDef, ParamKind};
use crate::{Error, Result, error::SourceContext, manifest::ParseContext};

impl FromStr for ClassSurface {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_surface(s, "surface.toml")
    }
}

impl ClassSurface {
    /// Parse a class surface file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        parse_surface(&content, &path.display().to_string())
    }
}

/// Parse a class surface from content with the given filename for error reporting.
pub fn parse_surface(content: &str, filename: &str) -> Result<ClassSurface> {
    let source_ctx = SourceContext::new(content, filename);
    let surface: ClassSurface =
        toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_surface(&surface, content, filename)?;
    Ok(surface)
}

fn validate_surface(surface: &ClassSurface, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);

    if surface.module.trim().is_empty() {
        return Err(ctx
            .source_context()
            .validation_error("surface module cannot be empty", None));
    }
    ctx.validate_python_name(&surface.name, "class", 0)?;

    let class_ctx = ctx.push(&surface.name);
    // occurrences of `name = "..."` seen so far, to point spans at the right one
    let mut seen: HashMap<&str, usize> = HashMap::new();

    for member in &surface.members {
        let name = member.name();
        let occurrence = seen.entry(name).or_insert(0);
        if *occurrence > 0 {
            return Err(ctx.source_context().duplicate_member_error(
                name,
                &surface.name,
                class_ctx.find_span(name, *occurrence),
            ));
        }
        *occurrence += 1;

        class_ctx.validate_python_name(name, "member", 0)?;

        if let MemberDef::Callable(def) = member {
            validate_callable(def, &class_ctx.push(name))?;
        }
    }

    Ok(())
}

fn validate_callable(def: &CallableDef, ctx: &ParseContext<'_>) -> Result<()> {
    let mut var_positional = 0;
    let mut var_keyword = 0;
    let mut names: Vec<&str> = Vec::with_capacity(def.params.len());

    for param in &def.params {
        ctx.validate_python_name(&param.name, "parameter", 0)?;

        if names.contains(&param.name.as_str()) {
            return Err(ctx.source_context().validation_error(
                format!(
                    "duplicate parameter '{}' in '{}'",
                    param.name,
                    ctx.path_string()
                ),
                ctx.find_span(&param.name, 1),
            ));
        }
        names.push(&param.name);

        match param.kind {
            ParamKind::VarPositional => var_positional += 1,
            ParamKind::VarKeyword => var_keyword += 1,
            _ => {}
        }
    }

    if var_positional > 1 || var_keyword > 1 {
        return Err(ctx.source_context().validation_error(
            format!(
                "'{}' declares more than one variadic parameter of the same kind",
                ctx.path_string()
            ),
            None,
        ));
    }

    match &def.wrapped {
        Some(inner) => validate_callable(inner, &ctx.push("<wrapped>")),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Annotation, ParamDef};

    const OPERATIONS: &str = r#"
        module = "alembic.operations.base"
        name = "Operations"

        [[members]]
        kind = "callable"
        name = "add_column"
        doc = "Issue an \"add column\" instruction."
        returns = { typing = "typing.Optional[typing.Any]" }

        [[members.params]]
        name = "self"

        [[members.params]]
        name = "table_name"
        annotation = { type = "str" }

        [[members.params]]
        name = "schema"
        default = true
        annotation = { typing = "typing.Optional[str]" }

        [[members]]
        kind = "attribute"
        name = "impl"

        [[members]]
        kind = "callable"
        name = "batch_alter_table"

        [members.wrapped]
        name = "batch_alter_table"
        doc = "Invoke a series of per-table migrations in batch."

        [[members.wrapped.params]]
        name = "self"

        [[members.wrapped.params]]
        name = "kw"
        kind = "var_keyword"
    "#;

    #[test]
    fn test_parse_surface() {
        let surface = ClassSurface::from_str(OPERATIONS).unwrap();

        assert_eq!(surface.module, "alembic.operations.base");
        assert_eq!(surface.name, "Operations");
        let names: Vec<_> = surface.members.iter().map(MemberDef::name).collect();
        assert_eq!(names, vec!["add_column", "impl", "batch_alter_table"]);

        let MemberDef::Callable(add_column) = &surface.members[0] else {
            panic!("add_column should be callable");
        };
        assert_eq!(add_column.params.len(), 3);
        assert_eq!(
            add_column.params[1],
            ParamDef::new("table_name").annotated(Annotation::builtin("str"))
        );
        assert!(add_column.params[2].default);
        assert_eq!(
            add_column.returns,
            Some(Annotation::typing("typing.Optional[typing.Any]"))
        );
        assert_eq!(
            add_column.doc.as_deref(),
            Some("Issue an \"add column\" instruction.")
        );
    }

    #[test]
    fn test_parse_wrapped_chain() {
        let surface = ClassSurface::from_str(OPERATIONS).unwrap();
        let MemberDef::Callable(batch) = &surface.members[2] else {
            panic!("batch_alter_table should be callable");
        };

        assert!(batch.params.is_empty());
        let original = batch.unwrap_original();
        assert_eq!(original.params[1].kind, ParamKind::VarKeyword);
        assert!(original.doc.as_deref().unwrap().starts_with("Invoke"));
    }

    #[test]
    fn test_duplicate_member() {
        let err = ClassSurface::from_str(
            r#"
            module = "m"
            name = "C"

            [[members]]
            kind = "attribute"
            name = "count"

            [[members]]
            kind = "attribute"
            name = "count"
            "#,
        )
        .unwrap_err();

        match *err {
            Error::DuplicateMember { name, span, .. } => {
                assert_eq!(name, "count");
                assert!(span.is_some());
            }
            other => panic!("expected duplicate member error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_member_name() {
        let err = ClassSurface::from_str(
            r#"
            module = "m"
            name = "C"

            [[members]]
            kind = "attribute"
            name = "not-valid"
            "#,
        )
        .unwrap_err();

        assert!(matches!(*err, Error::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_duplicate_parameter() {
        let err = ClassSurface::from_str(
            r#"
            module = "m"
            name = "C"

            [[members]]
            kind = "callable"
            name = "run"

            [[members.params]]
            name = "self"

            [[members.params]]
            name = "self"
            "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("duplicate parameter 'self'"));
    }

    #[test]
    fn test_two_var_keyword_params() {
        let err = ClassSurface::from_str(
            r#"
            module = "m"
            name = "C"

            [[members]]
            kind = "callable"
            name = "run"
            params = [
                { name = "self" },
                { name = "a", kind = "var_keyword" },
                { name = "b", kind = "var_keyword" },
            ]
            "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("more than one variadic"));
    }

    #[test]
    fn test_unknown_kind_is_parse_error() {
        let err = ClassSurface::from_str(
            r#"
            module = "m"
            name = "C"

            [[members]]
            kind = "property"
            name = "x"
            "#,
        )
        .unwrap_err();

        assert!(matches!(*err, Error::Parse { .. }));
    }

    fn assert_parse_error(src: &str) {
        let err = ClassSurface::from_str(src).unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }), "got {err:?}");
    }

    #[test]
    fn test_misspelled_param_key_is_parse_error() {
        assert_parse_error(
            r#"
            module = "alembic.operations.base"
            name = "Operations"

            [[members]]
            kind = "callable"
            name = "drop_table"

            [[members.params]]
            name = "self"

            [[members.params]]
            name = "table_name"
            anotation = { type = "str" }
            "#,
        );
    }

    #[test]
    fn test_misspelled_annotation_module_is_parse_error() {
        assert_parse_error(
            r#"
            module = "alembic.operations.base"
            name = "Operations"

            [[members]]
            kind = "callable"
            name = "add_column"

            [[members.params]]
            name = "self"

            [[members.params]]
            name = "column"
            annotation = { type = "Column", modul = "sqlalchemy.sql.schema" }
            "#,
        );
    }

    #[test]
    fn test_misspelled_callable_key_is_parse_error() {
        assert_parse_error(
            r#"
            module = "m"
            name = "C"

            [[members]]
            kind = "callable"
            name = "run"
            docs = "Run it."
            "#,
        );
    }

    #[test]
    fn test_unknown_attribute_key_is_parse_error() {
        assert_parse_error(
            r#"
            module = "m"
            name = "C"

            [[members]]
            kind = "attribute"
            name = "impl"
            type = "DefaultImpl"
            "#,
        );
    }

    #[test]
    fn test_empty_module() {
        let err = ClassSurface::from_str("module = \"\"\nname = \"C\"\n").unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }
}
