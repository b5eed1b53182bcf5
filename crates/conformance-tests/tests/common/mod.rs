// Allow dead_code because each test file is compiled as a separate crate,
// so not all helper functions are used in every test file.
#![allow(dead_code)]

use graphward_core::{
    Association, CompileResult, Direction, EntityDef, Policy, QueryCompiler, QueryPlan, Schema,
};
use graphward_cypher::render_plan;

// ============================================================================
// Fixture Schema
// ============================================================================

/// The content-management schema the conformance scenarios run against:
/// articles with a category, comments, mentions, and an owning user.
///
/// Relationship labels follow the owning side's declaration, so an inbound
/// association reuses the label of the outbound association pointing back.
pub fn content_schema() -> Schema {
    Schema::new()
        .with_entity(
            EntityDef::new("Article")
                .with_attribute("name")
                .with_attribute("published")
                .with_attribute("secret")
                .with_attribute("priority")
                .with_association(Association::new(
                    "category",
                    "Category",
                    "category",
                    Direction::Out,
                ))
                .with_association(Association::new("comments", "Comment", "article", Direction::In))
                .with_association(Association::new(
                    "mentions",
                    "Mention",
                    "mention",
                    Direction::Out,
                ))
                .with_association(Association::new("user", "User", "user", Direction::Out)),
        )
        .with_entity(
            EntityDef::new("Mention")
                .with_attribute("active")
                .with_association(Association::new("article", "Article", "mention", Direction::In))
                .with_association(Association::new("user", "User", "user", Direction::Out)),
        )
        .with_entity(
            EntityDef::new("Category")
                .with_attribute("name")
                .with_attribute("visible")
                .with_association(Association::new(
                    "articles",
                    "Article",
                    "category",
                    Direction::In,
                )),
        )
        .with_entity(
            EntityDef::new("Comment")
                .with_attribute("spam")
                .with_association(Association::new(
                    "article",
                    "Article",
                    "article",
                    Direction::Out,
                )),
        )
        .with_entity(
            EntityDef::new("User")
                .with_attribute("name")
                .with_association(Association::new("articles", "Article", "user", Direction::In))
                .with_association(Association::new("mentions", "Mention", "user", Direction::In)),
        )
}

// ============================================================================
// Compilation Helpers
// ============================================================================

/// Compiles a policy against the fixture schema.
pub fn compile(root_type: &str, policy: &Policy) -> CompileResult<QueryPlan> {
    QueryCompiler::new(content_schema()).compile(root_type, policy)
}

/// Compiles a policy and renders the plan as Cypher.
pub fn rendered(root_type: &str, policy: &Policy) -> String {
    let plan = compile(root_type, policy).expect("compilation should succeed");
    render_plan(&plan)
}
