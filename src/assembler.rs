//! Procedure assembler
//!
//! Builds one `Valid()` method per entity: header, the compiled statements of
//! every field in declaration order, footer.

use crate::compiler::compile_field;
use crate::error::{ValidgenError, ValidgenResult};
use crate::models::EntityDecl;
use crate::render::{render_footer, render_header, CodeWriter, RenderConfig, Statement};

/// An assembled method, ready to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Procedure {
    pub entity: String,
    /// Receiver variable, e.g. `p` for `Pill`
    pub receiver: String,
    /// Receiver type without the pointer, e.g. `Pair[K, V]`
    pub receiver_type: String,
    pub statements: Vec<Statement>,
}

impl Procedure {
    /// Whether the rendered method calls `errors.New`
    pub fn has_guards(&self) -> bool {
        self.statements.iter().any(Statement::is_guard)
    }

    pub fn render(&self, config: &RenderConfig) -> String {
        let mut w = CodeWriter::new();
        render_header(&mut w, &self.receiver, &self.receiver_type, config);
        for statement in &self.statements {
            statement.render(&mut w);
        }
        render_footer(&mut w);
        w.finish()
    }
}

/// Receiver name for an entity: its first character, lowercased.
///
/// Two entities may share a receiver letter; each method is self-contained.
pub fn receiver_name(entity: &str) -> String {
    entity
        .chars()
        .next()
        .map(|c| c.to_lowercase().collect())
        .unwrap_or_default()
}

fn receiver_type(entity: &EntityDecl) -> String {
    if entity.type_params.is_empty() {
        entity.name.clone()
    } else {
        format!("{}[{}]", entity.name, entity.type_params.join(", "))
    }
}

/// Assemble the method for one entity
pub fn assemble(entity: &EntityDecl) -> ValidgenResult<Procedure> {
    let receiver = receiver_name(&entity.name);
    if receiver.is_empty() {
        return Err(ValidgenError::Render {
            entity: entity.name.clone(),
            message: "entity has no name".to_string(),
        });
    }
    if let Some(field) = entity.fields.iter().find(|f| f.name.is_empty()) {
        return Err(ValidgenError::Render {
            entity: entity.name.clone(),
            message: format!("field of type {} has no name", field.ty),
        });
    }

    let statements = entity
        .fields
        .iter()
        .flat_map(|field| compile_field(field, &receiver))
        .collect();

    Ok(Procedure {
        entity: entity.name.clone(),
        receiver,
        receiver_type: receiver_type(entity),
        statements,
    })
}
