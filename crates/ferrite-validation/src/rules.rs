//! Rule tag grammar and per-type schema descriptors

/// One named, optionally parameterized constraint parsed from a tag
/// segment (`gte:7` → name `gte`, param `7`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Rule name looked up in the evaluator registry.
    pub name: String,
    /// Raw parameter after the first `:`, empty when absent. Multi-value
    /// rules split it on `,` themselves.
    pub param: String,
}

/// Ordered rules attached to one field via its tag.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
    skip: bool,
}

impl RuleSet {
    /// Parse a pipe-delimited tag. `""` and `"-"` both yield no rules;
    /// `"-"` additionally marks the field as skipped entirely (no
    /// validation, no recursion). Unknown rule names are kept and treated
    /// as no-ops by the evaluator lookup.
    pub fn parse(tag: &str) -> Self {
        if tag == "-" {
            return Self {
                rules: Vec::new(),
                skip: true,
            };
        }
        if tag.is_empty() {
            return Self::default();
        }

        let rules = tag
            .split('|')
            .filter(|segment| !segment.is_empty())
            .map(|segment| match segment.split_once(':') {
                Some((name, param)) => Rule {
                    name: name.to_string(),
                    param: param.to_string(),
                },
                None => Rule {
                    name: segment.to_string(),
                    param: String::new(),
                },
            })
            .collect();

        Self { rules, skip: false }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether the tag was the skip sentinel `-`.
    pub fn is_skip(&self) -> bool {
        self.skip
    }

    pub fn has(&self, name: &str) -> bool {
        self.rules.iter().any(|rule| rule.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }
}

/// Producer of a nested field's schema, held as a fn pointer so descriptor
/// lists stay `'static` and self-referential types stay expressible.
pub type SchemaRef = fn() -> &'static Schema;

/// Shape of one declared field.
#[derive(Clone)]
pub enum FieldKind {
    /// String, number, boolean, or any other leaf value.
    Scalar,
    /// A nested struct, possibly behind `Option` or `Box`.
    Nested(SchemaRef),
    /// A vector/array of structs, elements possibly behind `Option`/`Box`.
    List(SchemaRef),
    /// A flattened struct whose fields live on the parent object.
    Embedded(SchemaRef),
}

/// Descriptor for one field: normalized path segment, parsed rules, shape.
#[derive(Clone)]
pub struct FieldDef {
    pub name: String,
    pub rules: RuleSet,
    pub kind: FieldKind,
}

/// Ordered field descriptors for one composite type.
///
/// Built once per type and cached behind `once_cell::sync::Lazy` by
/// [`Validatable`](crate::Validatable) implementations, so tags are parsed
/// exactly once per type no matter how many values are validated.
#[derive(Clone, Default)]
pub struct Schema {
    fields: Vec<FieldDef>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a scalar field. `name` is normalized to a
    /// lowercase-underscore path segment.
    pub fn field(self, name: &str, tag: &str) -> Self {
        self.push(name, tag, FieldKind::Scalar)
    }

    /// Declare a nested struct field.
    pub fn nested(self, name: &str, tag: &str, schema: SchemaRef) -> Self {
        self.push(name, tag, FieldKind::Nested(schema))
    }

    /// Declare a vector/array-of-structs field.
    pub fn list(self, name: &str, tag: &str, schema: SchemaRef) -> Self {
        self.push(name, tag, FieldKind::List(schema))
    }

    /// Declare an embedded (flattened) struct whose fields are validated
    /// against this type's own object, with no extra path segment. Tagging
    /// it `-` skips the embedded fields wholesale.
    pub fn embedded(mut self, tag: &str, schema: SchemaRef) -> Self {
        self.fields.push(FieldDef {
            name: String::new(),
            rules: RuleSet::parse(tag),
            kind: FieldKind::Embedded(schema),
        });
        self
    }

    fn push(mut self, name: &str, tag: &str, kind: FieldKind) -> Self {
        self.fields.push(FieldDef {
            name: segment_name(name),
            rules: RuleSet::parse(tag),
            kind,
        });
        self
    }

    /// Field descriptors in declaration order.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }
}

/// Convert an identifier's word-boundary casing into lowercase words joined
/// by underscores: `SlicesPtr` → `slices_ptr`, `HTTPServer` → `http_server`,
/// `member_code` unchanged.
pub fn segment_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let after_word = i > 0
                && (chars[i - 1].is_lowercase()
                    || chars[i - 1].is_ascii_digit()
                    || (chars[i - 1].is_uppercase()
                        && chars.get(i + 1).is_some_and(|next| next.is_lowercase())));
            if after_word {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
