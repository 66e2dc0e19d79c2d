use crate::core::{DbError, Result, Value};

/// Placeholder that expands to the bound entity's table name.
pub const TABLE_PLACEHOLDER: &str = "table";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Table,
    Param(&'static str),
}

/// A parsed `{name}` template.
///
/// `{{` and `}}` are literal braces. Format specs and conversions
/// (`{name:>4}`, `{name!r}`) are not supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parses `source`, accepting only `{table}` and the names in `params`.
    pub fn parse(source: &str, params: &'static [&'static str]) -> Result<Self> {
        if params.contains(&TABLE_PLACEHOLDER) {
            return Err(DbError::InvalidTemplate(format!(
                "parameter name '{}' is reserved",
                TABLE_PLACEHOLDER
            )));
        }

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => {
                    return Err(DbError::InvalidTemplate(format!(
                        "single '}}' in \"{}\"",
                        source
                    )));
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some('{') | None => {
                                return Err(DbError::InvalidTemplate(format!(
                                    "unclosed '{{' in \"{}\"",
                                    source
                                )));
                            }
                            Some(c) => name.push(c),
                        }
                    }

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Self::placeholder(&name, params)?);
                }
                other => literal.push(other),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    fn placeholder(name: &str, params: &'static [&'static str]) -> Result<Segment> {
        if name.is_empty() || name.contains([':', '!']) {
            return Err(DbError::InvalidTemplate(format!(
                "unsupported placeholder '{{{}}}'",
                name
            )));
        }
        if name == TABLE_PLACEHOLDER {
            return Ok(Segment::Table);
        }
        params
            .iter()
            .find(|p| **p == name)
            .map(|p| Segment::Param(*p))
            .ok_or_else(|| DbError::UnknownPlaceholder(name.to_string()))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Names of the parameters the template references, in order of use.
    pub fn params(&self) -> Vec<&'static str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Param(name) => Some(*name),
                _ => None,
            })
            .collect()
    }

    /// Substitutes the table name and each parameter's textual value.
    pub fn render<F>(&self, table: &str, mut lookup: F) -> Result<String>
    where
        F: FnMut(&str) -> Option<Value>,
    {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Table => out.push_str(table),
                Segment::Param(name) => {
                    let value =
                        lookup(name).ok_or_else(|| DbError::UnknownPlaceholder(name.to_string()))?;
                    out.push_str(&value.to_string());
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUERY: &[&str] = &["query"];

    fn lookup(name: &str) -> Option<Value> {
        (name == "query").then(|| Value::from("Kuch"))
    }

    #[test]
    fn test_renders_table_and_params() {
        let t = Template::parse("SELECT * FROM {table} WHERE name LIKE '%{query}%'", QUERY).unwrap();
        assert_eq!(t.params(), vec!["query"]);
        assert_eq!(
            t.render("Food", lookup).unwrap(),
            "SELECT * FROM Food WHERE name LIKE '%Kuch%'"
        );
    }

    #[test]
    fn test_double_braces_are_literal() {
        let t = Template::parse("SELECT '{{x}}' FROM {table}", &[]).unwrap();
        assert_eq!(t.render("Food", |_| None).unwrap(), "SELECT '{x}' FROM Food");
    }

    #[test]
    fn test_undeclared_placeholder_fails_at_parse() {
        let err = Template::parse("SELECT * FROM {table} WHERE uid = {uid}", QUERY).unwrap_err();
        assert!(matches!(err, DbError::UnknownPlaceholder(ref n) if n == "uid"));
    }

    #[test]
    fn test_malformed_templates() {
        for bad in ["SELECT {table", "SELECT }", "SELECT {}", "SELECT {query:>3}", "{a{b}}"] {
            let err = Template::parse(bad, QUERY).unwrap_err();
            assert!(matches!(err, DbError::InvalidTemplate(_)), "{bad}: {err:?}");
        }
    }

    #[test]
    fn test_positional_placeholder_is_not_the_table() {
        let err = Template::parse("SELECT * FROM {0}", QUERY).unwrap_err();
        assert!(matches!(err, DbError::UnknownPlaceholder(ref n) if n == "0"));
    }

    #[test]
    fn test_reserved_param_name() {
        const TABLE: &[&str] = &["table"];
        assert!(matches!(
            Template::parse("SELECT 1", TABLE),
            Err(DbError::InvalidTemplate(_))
        ));
    }
}
