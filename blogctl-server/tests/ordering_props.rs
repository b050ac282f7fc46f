//! Property: listing is non-increasing by `created_at` for any insertion order.

use blogctl_server::db::{BlogStore, MemoryStore, PostRepo};
use blogctl_server::models::{NewPost, PostContent, PostTitle, UserName};
use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

fn run<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(fut)
}

proptest! {
    /// Property: list order is newest first regardless of insert order
    #[test]
    fn prop_list_sorted_desc(offsets in prop::collection::vec(0i64..10_000, 0..50)) {
        let listed = run(async {
            let store = MemoryStore::new();
            store.seed_user(1, &UserName::new("a").unwrap()).await;

            let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            for (i, offset) in offsets.iter().enumerate() {
                let post = NewPost::with_created_at(
                    PostTitle::new(&format!("post {i}")).unwrap(),
                    PostContent::new("body").unwrap(),
                    1,
                    base + Duration::seconds(*offset),
                );
                store.insert_post(&post).await.unwrap();
            }

            PostRepo::new(&store).list().await.unwrap()
        });

        prop_assert_eq!(listed.len(), offsets.len());
        for pair in listed.windows(2) {
            prop_assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    /// Property: two reads with no write in between are identical
    #[test]
    fn prop_list_idempotent(count in 0usize..30) {
        let (first, second) = run(async {
            let store = MemoryStore::new();
            store.seed_user(1, &UserName::new("a").unwrap()).await;
            let repo = PostRepo::new(&store);
            for i in 0..count {
                repo.create(
                    PostTitle::new(&format!("t{i}")).unwrap(),
                    PostContent::new("c").unwrap(),
                    1,
                )
                .await
                .unwrap();
            }
            (repo.list().await.unwrap(), repo.list().await.unwrap())
        });

        prop_assert_eq!(first, second);
    }
}
