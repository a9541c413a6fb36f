//! Export-map rule identifiers.
//!
//! These strings are part of the JSON report contract; do not rename them.

pub const EXPORTS_ALTERNATIVES_EMPTY: &str = "exports-alternatives-empty";
pub const EXPORTS_ALTERNATIVES: &str = "exports-alternatives";
pub const EXPORTS_OBJECT_EMPTY: &str = "exports-object-empty";
pub const EXPORTS_OBJECT_MIXED: &str = "exports-object-mixed";
pub const EXPORTS_SPECIFIER_NESTED: &str = "exports-specifier-nested";
pub const EXPORTS_VALUE_INVALID: &str = "exports-value-invalid";

pub const EXPORTS_CONDITIONS_VERBOSE: &str = "exports-conditions-verbose";
pub const EXPORTS_TYPES_VERBOSE: &str = "exports-types-verbose";
pub const EXPORTS_CONDITIONS_MUTUALLY_EXCLUSIVE: &str = "exports-conditions-mutually-exclusive";
pub const EXPORTS_CONDITIONS_DEFAULT_MISPLACED: &str = "exports-conditions-default-misplaced";
pub const EXPORTS_CONDITIONS_DEFAULT_MISSING: &str = "exports-conditions-default-missing";

pub const EXPORTS_SPECIFIER_EXTENSION: &str = "exports-specifier-extension";
pub const EXPORTS_SPECIFIER_WILDCARD_INVALID: &str = "exports-specifier-wildcard-invalid";
pub const EXPORTS_SPECIFIER_WILDCARD_USELESS: &str = "exports-specifier-wildcard-useless";

pub const EXPORTS_PATH_UNPREFIXED: &str = "exports-path-unprefixed";
pub const EXPORTS_PATH_WILDCARD_NOT_FOUND: &str = "exports-path-wildcard-not-found";
pub const EXPORTS_PATH_NOT_FOUND: &str = "exports-path-not-found";
pub const EXPORTS_NEGATED_MISSING: &str = "exports-negated-missing";
pub const EXPORTS_NPM_IGNORED: &str = "exports-npm-ignored";
pub const EXPORTS_MAIN_MISSING: &str = "exports-main-missing";

// Legacy `main` field
pub const MAIN_PATH_NOT_FOUND: &str = "main-path-not-found";
pub const MAIN_NPM_IGNORED: &str = "main-npm-ignored";

/// Every rule id, in table order.
pub const ALL: &[&str] = &[
    EXPORTS_ALTERNATIVES_EMPTY,
    EXPORTS_ALTERNATIVES,
    EXPORTS_OBJECT_EMPTY,
    EXPORTS_OBJECT_MIXED,
    EXPORTS_SPECIFIER_NESTED,
    EXPORTS_VALUE_INVALID,
    EXPORTS_CONDITIONS_VERBOSE,
    EXPORTS_TYPES_VERBOSE,
    EXPORTS_CONDITIONS_MUTUALLY_EXCLUSIVE,
    EXPORTS_CONDITIONS_DEFAULT_MISPLACED,
    EXPORTS_CONDITIONS_DEFAULT_MISSING,
    EXPORTS_SPECIFIER_EXTENSION,
    EXPORTS_PATH_UNPREFIXED,
    EXPORTS_SPECIFIER_WILDCARD_INVALID,
    EXPORTS_SPECIFIER_WILDCARD_USELESS,
    EXPORTS_PATH_WILDCARD_NOT_FOUND,
    EXPORTS_PATH_NOT_FOUND,
    EXPORTS_NEGATED_MISSING,
    EXPORTS_NPM_IGNORED,
    EXPORTS_MAIN_MISSING,
    MAIN_PATH_NOT_FOUND,
    MAIN_NPM_IGNORED,
];
