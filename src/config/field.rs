//! Option identifiers, compact option sets, and key prefixes.

// self
use crate::_prelude::*;

/// Optional credential options, in declaration order.
///
/// Declaration order drives validation order, so the first reported error is deterministic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionField {
	/// `access_key_id`.
	AccessKeyId,
	/// `secret_access_key`.
	SecretAccessKey,
	/// `session_token`.
	SessionToken,
	/// `profile_file`.
	ProfileFile,
	/// `profile_name`.
	ProfileName,
	/// `account_id`.
	AccountId,
	/// `role_name`.
	RoleName,
	/// `external_id`.
	ExternalId,
	/// `role_arn`.
	RoleArn,
	/// `role_session_name`.
	RoleSessionName,
	/// `web_identity_token_file`.
	WebIdentityTokenFile,
}
impl OptionField {
	/// Every optional field, in declaration order.
	pub const ALL: [Self; 11] = [
		Self::AccessKeyId,
		Self::SecretAccessKey,
		Self::SessionToken,
		Self::ProfileFile,
		Self::ProfileName,
		Self::AccountId,
		Self::RoleName,
		Self::ExternalId,
		Self::RoleArn,
		Self::RoleSessionName,
		Self::WebIdentityTokenFile,
	];

	/// Returns the unprefixed configuration key.
	pub const fn key(self) -> &'static str {
		match self {
			Self::AccessKeyId => "access_key_id",
			Self::SecretAccessKey => "secret_access_key",
			Self::SessionToken => "session_token",
			Self::ProfileFile => "profile_file",
			Self::ProfileName => "profile_name",
			Self::AccountId => "account_id",
			Self::RoleName => "role_name",
			Self::ExternalId => "external_id",
			Self::RoleArn => "role_arn",
			Self::RoleSessionName => "role_session_name",
			Self::WebIdentityTokenFile => "web_identity_token_file",
		}
	}

	/// Returns the option name as the user wrote it under `prefix`.
	pub fn option_name(self, prefix: OptionPrefix) -> String {
		format!("{}{}", prefix.as_str(), self.key())
	}

	const fn bit(self) -> u16 {
		1 << self as u16
	}
}
impl Display for OptionField {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.key())
	}
}

/// Compact set of [`OptionField`]s.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FieldSet(u16);
impl FieldSet {
	/// Set without any field.
	pub const EMPTY: Self = Self(0);

	/// Builds a set from a list of fields.
	pub const fn of(fields: &[OptionField]) -> Self {
		let mut bits = 0;
		let mut i = 0;

		while i < fields.len() {
			bits |= fields[i].bit();
			i += 1;
		}

		Self(bits)
	}

	/// Returns true if `field` belongs to the set.
	pub const fn contains(self, field: OptionField) -> bool {
		self.0 & field.bit() != 0
	}

	/// Returns the union of both sets.
	pub const fn union(self, other: Self) -> Self {
		Self(self.0 | other.0)
	}

	/// Returns true when no field is present.
	pub const fn is_empty(self) -> bool {
		self.0 == 0
	}

	/// Iterates members in declaration order.
	pub fn iter(self) -> impl Iterator<Item = OptionField> {
		OptionField::ALL.into_iter().filter(move |field| self.contains(*field))
	}
}
impl Debug for FieldSet {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_set().entries(self.iter().map(OptionField::key)).finish()
	}
}
impl FromIterator<OptionField> for FieldSet {
	fn from_iter<I: IntoIterator<Item = OptionField>>(iter: I) -> Self {
		Self(iter.into_iter().fold(0, |bits, field| bits | field.bit()))
	}
}

/// Key prefix of the configuration shape a record was loaded from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OptionPrefix {
	/// Unprefixed keys (`auth_method`, `access_key_id`, …).
	#[default]
	None,
	/// `aws_`-prefixed keys (`aws_auth_method`, `aws_access_key_id`, …) for embedding inside a
	/// larger configuration namespace.
	Aws,
}
impl OptionPrefix {
	/// Returns the literal prefix.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::None => "",
			Self::Aws => "aws_",
		}
	}

	/// Returns the name of the method-selecting option under this prefix.
	pub fn auth_method_option(self) -> String {
		format!("{}auth_method", self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn field_set_membership_and_order() {
		let set = FieldSet::of(&[OptionField::SessionToken, OptionField::AccessKeyId]);

		assert!(set.contains(OptionField::AccessKeyId));
		assert!(set.contains(OptionField::SessionToken));
		assert!(!set.contains(OptionField::SecretAccessKey));
		assert_eq!(
			set.iter().collect::<Vec<_>>(),
			vec![OptionField::AccessKeyId, OptionField::SessionToken]
		);
		assert!(FieldSet::EMPTY.is_empty());
		assert_eq!(set.union(FieldSet::EMPTY), set);
		assert_eq!(set.iter().collect::<FieldSet>(), set);
	}

	#[test]
	fn option_names_follow_prefix() {
		assert_eq!(OptionField::ProfileName.option_name(OptionPrefix::None), "profile_name");
		assert_eq!(OptionField::ProfileName.option_name(OptionPrefix::Aws), "aws_profile_name");
		assert_eq!(OptionPrefix::Aws.auth_method_option(), "aws_auth_method");
	}

	#[test]
	fn every_field_has_a_distinct_bit() {
		let all = OptionField::ALL.into_iter().collect::<FieldSet>();

		assert_eq!(all.iter().count(), OptionField::ALL.len());
	}
}
