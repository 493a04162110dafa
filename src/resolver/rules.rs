//! Closed per-method option legality table.
//!
//! Adding a method is a data change: extend [`AuthMethod`] and add its row to `METHOD_RULES`.

// self
use crate::{
	_prelude::*,
	auth::AuthMethod,
	config::{CredentialsConfig, FieldSet, OptionField},
};

/// Options a method requires and options it merely accepts; everything else is forbidden.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MethodRules {
	/// Options that must carry a value.
	pub required: FieldSet,
	/// Options that may carry a value.
	pub optional: FieldSet,
}
impl MethodRules {
	const NONE: Self = Self { required: FieldSet::EMPTY, optional: FieldSet::EMPTY };

	/// Options that may appear at all.
	pub const fn allowed(self) -> FieldSet {
		self.required.union(self.optional)
	}

	/// Returns true when `field` must be absent.
	pub const fn forbids(self, field: OptionField) -> bool {
		!self.allowed().contains(field)
	}
}

/// Rows indexed by `AuthMethod as usize`, i.e. in [`AuthMethod::ALL`] order.
const METHOD_RULES: [MethodRules; 10] = [
	// basic
	MethodRules {
		required: FieldSet::of(&[OptionField::AccessKeyId, OptionField::SecretAccessKey]),
		optional: FieldSet::EMPTY,
	},
	// env
	MethodRules::NONE,
	// instance
	MethodRules::NONE,
	// profile
	MethodRules {
		required: FieldSet::EMPTY,
		optional: FieldSet::of(&[OptionField::ProfileFile, OptionField::ProfileName]),
	},
	// properties
	MethodRules::NONE,
	// anonymous
	MethodRules::NONE,
	// session
	MethodRules {
		required: FieldSet::of(&[
			OptionField::AccessKeyId,
			OptionField::SecretAccessKey,
			OptionField::SessionToken,
		]),
		optional: FieldSet::EMPTY,
	},
	// assume_role
	MethodRules {
		required: FieldSet::of(&[
			OptionField::AccountId,
			OptionField::RoleName,
			OptionField::ExternalId,
		]),
		optional: FieldSet::EMPTY,
	},
	// web_identity_token
	MethodRules {
		required: FieldSet::of(&[OptionField::RoleArn, OptionField::WebIdentityTokenFile]),
		optional: FieldSet::of(&[OptionField::RoleSessionName]),
	},
	// default
	MethodRules::NONE,
];

/// Legacy `basic` row used when neither key is set: behaves as `anonymous`.
const LEGACY_ANONYMOUS_RULES: MethodRules = MethodRules::NONE;

/// Row of the legality table selected for a configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleKey {
	/// Regular row for the method.
	Method(AuthMethod),
	/// `basic` with neither key set; kept for backward compatibility and reported as deprecated.
	LegacyAnonymous,
}
impl RuleKey {
	/// Selects the row for `method`, taking the legacy fallback when `basic` has no keys at all.
	pub fn select(method: AuthMethod, config: &CredentialsConfig) -> Self {
		let keyless = !config.is_present(OptionField::AccessKeyId)
			&& !config.is_present(OptionField::SecretAccessKey);

		if method == AuthMethod::Basic && keyless {
			Self::LegacyAnonymous
		} else {
			Self::Method(method)
		}
	}

	/// Method the row belongs to.
	pub const fn method(self) -> AuthMethod {
		match self {
			Self::Method(method) => method,
			Self::LegacyAnonymous => AuthMethod::Basic,
		}
	}

	/// Legality rules of the row.
	pub const fn rules(self) -> MethodRules {
		match self {
			Self::Method(method) => rules_for(method),
			Self::LegacyAnonymous => LEGACY_ANONYMOUS_RULES,
		}
	}
}

/// Looks up the regular row for `method`.
pub const fn rules_for(method: AuthMethod) -> MethodRules {
	METHOD_RULES[method as usize]
}
