use serde::Serialize;

use crate::{ComponentId, Role, TagRegistry, sort_by_priority};

/// Priority-ordered, immutable sequence of the components holding one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderedChain {
	role: Role,
	ids: Box<[ComponentId]>,
}

impl OrderedChain {
	/// Collects every component holding `role`, lowest priority first.
	pub fn collect<T>(registry: &TagRegistry<T>, role: Role) -> Self {
		let ids = sort_by_priority(registry.by_role(role), |id| registry.priority_of(id));
		Self {
			role,
			ids: ids.into_boxed_slice(),
		}
	}

	pub fn role(&self) -> Role {
		self.role
	}

	pub fn ids(&self) -> &[ComponentId] {
		&self.ids
	}

	pub fn iter(&self) -> impl Iterator<Item = &ComponentId> {
		self.ids.iter()
	}

	pub fn len(&self) -> usize {
		self.ids.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}
}

impl<'a> IntoIterator for &'a OrderedChain {
	type Item = &'a ComponentId;
	type IntoIter = std::slice::Iter<'a, ComponentId>;

	fn into_iter(self) -> Self::IntoIter {
		self.ids.iter()
	}
}
