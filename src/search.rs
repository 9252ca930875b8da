use crate::app::AppState;
use crate::net::UserRecord;

/// Case-insensitive substring match on the display name. Empty queries match everything.
pub fn matches(user: &UserRecord, query: &str) -> bool {
    user.name.to_lowercase().contains(&query.to_lowercase())
}

/// Narrow `users` to those whose name contains `query`, preserving input order.
pub fn filter_users<'a>(users: &'a [UserRecord], query: &str) -> Vec<&'a UserRecord> {
    let q = query.to_lowercase();
    if q.is_empty() {
        return users.iter().collect();
    }
    users
        .iter()
        .filter(|u| u.name.to_lowercase().contains(&q))
        .collect()
}

/// Re-anchor the cursor after the query changed.
///
/// The cursor stays on the record with id `anchor` when it is still visible,
/// otherwise it goes back to the first row.
pub fn apply_search(app: &mut AppState, anchor: Option<i64>) {
    let visible = app.visible_users();
    let idx = anchor
        .and_then(|id| visible.iter().position(|u| u.id == id))
        .unwrap_or(0);
    let last = visible.len().saturating_sub(1);
    app.selected_index = idx.min(last);
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::app::{AppState, ViewState};

	fn sample() -> Vec<UserRecord> {
		vec![UserRecord::new(1, "John Doe"), UserRecord::new(2, "Jane Doe")]
	}

	fn names(users: &[&UserRecord]) -> Vec<String> {
		users.iter().map(|u| u.name.clone()).collect()
	}

	#[test]
	fn empty_query_keeps_everything_in_order() {
		let users = sample();
		assert_eq!(names(&filter_users(&users, "")), vec!["John Doe", "Jane Doe"]);
	}

	#[test]
	fn query_is_case_insensitive_substring() {
		let users = sample();
		assert_eq!(names(&filter_users(&users, "John")), vec!["John Doe"]);
		assert_eq!(names(&filter_users(&users, "jOHN")), vec!["John Doe"]);
		assert_eq!(names(&filter_users(&users, "doe")), vec!["John Doe", "Jane Doe"]);
		assert_eq!(names(&filter_users(&users, "n d")), vec!["John Doe"]);
	}

	#[test]
	fn query_is_not_trimmed() {
		let users = sample();
		assert!(filter_users(&users, " John").is_empty());
		assert!(!matches(&users[0], "Doe "));
	}

	#[test]
	fn unmatched_query_yields_nothing_without_touching_input() {
		let users = sample();
		assert!(filter_users(&users, "None").is_empty());
		assert_eq!(users.len(), 2);
	}

	#[test]
	fn cursor_follows_anchor_or_resets() {
		let mut app = AppState::new(Default::default(), Default::default());
		app.view = ViewState::Ready(vec![
			UserRecord::new(1, "John Doe"),
			UserRecord::new(2, "Jane Doe"),
			UserRecord::new(3, "Janet Roe"),
		]);
		app.search_query = "jan".to_string();
		apply_search(&mut app, Some(3));
		assert_eq!(app.selected_index, 1);

		app.search_query = "john".to_string();
		apply_search(&mut app, Some(3));
		assert_eq!(app.selected_index, 0);

		app.search_query = "nobody".to_string();
		apply_search(&mut app, Some(1));
		assert_eq!(app.selected_index, 0);
	}
}
