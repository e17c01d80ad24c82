use crate::ComponentId;

/// Orders `ids` by ascending priority.
///
/// The sort key is `(priority, input position)`, so equal priorities keep
/// their relative input order regardless of the sort algorithm underneath.
pub fn sort_by_priority<'a, I, F>(ids: I, mut priority_of: F) -> Vec<ComponentId>
where
	I: IntoIterator<Item = &'a ComponentId>,
	F: FnMut(&str) -> i32,
{
	let mut keyed: Vec<(i32, usize, &ComponentId)> = ids
		.into_iter()
		.enumerate()
		.map(|(pos, id)| (priority_of(id.as_str()), pos, id))
		.collect();
	keyed.sort_unstable_by_key(|&(priority, pos, _)| (priority, pos));
	keyed.into_iter().map(|(_, _, id)| id.clone()).collect()
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;
	use rustc_hash::FxHashMap as HashMap;

	use super::*;

	fn sorted(entries: &[(&str, i32)]) -> Vec<String> {
		let ids: Vec<ComponentId> = entries.iter().map(|(id, _)| ComponentId::from(*id)).collect();
		let priorities: HashMap<&str, i32> = entries.iter().copied().collect();
		sort_by_priority(&ids, |id| priorities[id])
			.into_iter()
			.map(|id| id.to_string())
			.collect()
	}

	#[test]
	fn ascending_priority() {
		assert_eq!(sorted(&[("thirty", 30), ("ten", 10), ("twenty", 20)]), ["ten", "twenty", "thirty"]);
	}

	#[test]
	fn negative_priority_sorts_before_zero() {
		assert_eq!(sorted(&[("zero", 0), ("early", -1), ("late", 1)]), ["early", "zero", "late"]);
	}

	#[test]
	fn ties_keep_input_order() {
		assert_eq!(
			sorted(&[("b", 5), ("a", 5), ("c", 0), ("d", 5)]),
			["c", "b", "a", "d"]
		);
	}

	#[test]
	fn empty_input() {
		assert!(sorted(&[]).is_empty());
	}

	proptest! {
		/// Output is a permutation ordered by priority, equal priorities in input order.
		#[test]
		fn prop_stable_total_order(priorities in prop::collection::vec(-3i32..3, 0..40)) {
			let ids: Vec<ComponentId> = (0..priorities.len()).map(|i| ComponentId::new(format!("c{i}"))).collect();
			let out = sort_by_priority(&ids, |id| {
				let pos: usize = id[1..].parse().unwrap();
				priorities[pos]
			});

			prop_assert_eq!(out.len(), ids.len());
			let positions: Vec<usize> = out.iter().map(|id| id.as_str()[1..].parse().unwrap()).collect();
			for pair in positions.windows(2) {
				let (a, b) = (pair[0], pair[1]);
				prop_assert!(priorities[a] < priorities[b] || (priorities[a] == priorities[b] && a < b));
			}
		}

		/// Sorting the same input twice yields the same output.
		#[test]
		fn prop_deterministic(priorities in prop::collection::vec(any::<i32>(), 0..40)) {
			let ids: Vec<ComponentId> = (0..priorities.len()).map(|i| ComponentId::new(format!("c{i}"))).collect();
			let lookup = |id: &str| priorities[id[1..].parse::<usize>().unwrap()];
			prop_assert_eq!(sort_by_priority(&ids, lookup), sort_by_priority(&ids, lookup));
		}
	}
}
