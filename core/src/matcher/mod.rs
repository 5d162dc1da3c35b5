#![deny(missing_docs)]

//! # Path Matching
//!
//! - **exact**: exactification of templates and concrete paths.
//! - `PathIndex`: the Concrete -> Template reverse lookup plus method-set and
//!   operation derivation over a parsed document.

pub mod exact;

pub use exact::ExactForm;

use crate::oas::models::{ApiDocument, Method, Operation, PathTemplate};
use log::debug;

/// An index of a document's path templates by exact form.
///
/// Resolution is set-valued: a concrete path compatible with several declared
/// templates yields all of them. Overlapping templates are reported once at
/// build time and are not an error.
pub struct PathIndex<'a> {
    doc: &'a ApiDocument,
    entries: Vec<(ExactForm, &'a PathTemplate)>,
}

impl<'a> PathIndex<'a> {
    /// Exactifies every template of the document.
    pub fn build(doc: &'a ApiDocument) -> PathIndex<'a> {
        let entries: Vec<(ExactForm, &PathTemplate)> = doc
            .templates
            .iter()
            .map(|template| (ExactForm::of_template(template), template))
            .collect();

        for (i, (exact, template)) in entries.iter().enumerate() {
            for (other_exact, other) in entries.iter().skip(i + 1) {
                if exact.equivalent(other_exact) {
                    debug!(
                        "templates '{}' and '{}' overlap; resolution is set-valued",
                        template.path, other.path
                    );
                }
            }
        }

        PathIndex { doc, entries }
    }

    /// Reverse lookup: every declared template whose exact form is equivalent
    /// to the exact form of `concrete`.
    ///
    /// A caller path that names a declared template verbatim widens by that
    /// template's own parameter schemas; unknown bracketed segments widen to
    /// the any wildcard.
    pub fn resolve(&self, concrete: &str) -> Vec<&'a PathTemplate> {
        let form = match self.doc.template(concrete) {
            Some(template) => ExactForm::of_template(template),
            None => ExactForm::of_concrete(concrete),
        };
        self.entries
            .iter()
            .filter(|(exact, _)| exact.equivalent(&form))
            .map(|(_, template)| *template)
            .collect()
    }

    /// The method set declared for a template, by its declared path string.
    pub fn methods(&self, template: &str) -> Option<Vec<Method>> {
        self.doc.template(template).map(PathTemplate::methods)
    }

    /// The operation declared for (template, method), if any.
    pub fn operation(&self, template: &str, method: Method) -> Option<&'a Operation> {
        self.doc
            .template(template)
            .and_then(|t| t.operation(method))
    }

    /// The operations-keyed direction: the template owning an `operationId`.
    pub fn template_of(&self, operation_id: &str) -> Option<&'a PathTemplate> {
        self.doc
            .operation_index
            .get(operation_id)
            .and_then(|path| self.doc.template(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::document::parse_document;

    const FIXTURE: &str = r#"
openapi: 3.0.2
info: { title: fixture, version: "1" }
paths:
  /pet:
    post:
      operationId: addPet
      responses:
        "200": { description: ok }
    put:
      operationId: updatePet
      responses:
        "200": { description: ok }
  /pet/findByStatus:
    get:
      operationId: findPetsByStatus
      responses:
        "200": { description: ok }
  /pet/{petId}:
    parameters:
      - name: petId
        in: path
        required: true
        schema: { type: integer, format: int64 }
    get:
      operationId: getPetById
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema: { $ref: '#/components/schemas/Pet' }
    delete:
      operationId: deletePet
      responses:
        "400": { description: bad }
  /pet/state/{state}:
    parameters:
      - name: state
        in: path
        required: true
        schema:
          type: string
          enum: [available, pending]
    get:
      operationId: petsByState
      responses:
        "200": { description: ok }
components:
  schemas:
    Pet:
      type: object
      properties:
        name: { type: string }
"#;

    fn fixture() -> crate::oas::models::ApiDocument {
        parse_document(FIXTURE).unwrap()
    }

    #[test]
    fn test_resolve_substituted_literal() {
        let doc = fixture();
        let index = PathIndex::build(&doc);

        let matches = index.resolve("/pet/3");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].path, "/pet/{petId}");
    }

    #[test]
    fn test_resolve_rejects_non_numeric_token() {
        let doc = fixture();
        let index = PathIndex::build(&doc);
        // petId is numeric; "abc" has no numeric shape and findByStatus is a
        // different literal.
        assert!(index.resolve("/pet/abc").is_empty());
    }

    #[test]
    fn test_literal_template_wins_over_sibling_wildcard() {
        let doc = fixture();
        let index = PathIndex::build(&doc);

        let matches = index.resolve("/pet/findByStatus");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].path, "/pet/findByStatus");
    }

    #[test]
    fn test_resolve_template_literal_form() {
        let doc = fixture();
        let index = PathIndex::build(&doc);

        let matches = index.resolve("/pet/{petId}");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].path, "/pet/{petId}");
    }

    #[test]
    fn test_bounded_state_parameter() {
        let doc = fixture();
        let index = PathIndex::build(&doc);

        assert_eq!(index.resolve("/pet/state/available").len(), 1);
        assert_eq!(index.resolve("/pet/state/pending").len(), 1);
        assert!(index.resolve("/pet/state/sold").is_empty());
    }

    #[test]
    fn test_method_set_derivation() {
        let doc = fixture();
        let index = PathIndex::build(&doc);

        assert_eq!(
            index.methods("/pet"),
            Some(vec![Method::Post, Method::Put])
        );
        assert_eq!(
            index.methods("/pet/{petId}"),
            Some(vec![Method::Get, Method::Delete])
        );
        assert_eq!(index.methods("/unknown"), None);
    }

    #[test]
    fn test_operation_lookup() {
        let doc = fixture();
        let index = PathIndex::build(&doc);

        let op = index.operation("/pet/{petId}", Method::Get).unwrap();
        assert_eq!(op.handler_name, "get_pet_by_id");
        assert_eq!(op.response_type.as_deref(), Some("Pet"));

        // Undeclared methods have no operation.
        assert!(index.operation("/pet/{petId}", Method::Patch).is_none());
    }

    #[test]
    fn test_template_of_operation_id() {
        let doc = fixture();
        let index = PathIndex::build(&doc);

        assert_eq!(
            index.template_of("getPetById").map(|t| t.path.as_str()),
            Some("/pet/{petId}")
        );
        assert!(index.template_of("missing").is_none());
    }
}
