// Schema-level string constants shared by storage, graph, and analytics.

/// Default type discriminator for idea links.
pub const INCLUSION_LINK_TYPE: &str = "idea:InclusionRelation";

/// Separator appended after every post id in an ancestry string.
pub const ANCESTRY_SEPARATOR: char = ',';

/// Target length of an idea definition preview, in characters.
pub const DEFINITION_PREVIEW_LEN: usize = 120;

/// Current schema version; bumped with every migration.
pub const SCHEMA_VERSION: u32 = 2;
