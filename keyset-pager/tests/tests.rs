use fixtures::{GlossaryAdapter, GlossaryEntry, glossary_rows, setup_logger};
use keyset_pager::{
    CursorPayload, Direction, EntityAdapter, KeysetPager, MemoryStore, PageRequest, PageResult,
    PageStore, PagerConfig, RawPageParams, encode_cursor,
};
use std::collections::HashSet;
use std::sync::Arc;


// Generous upper bound on pages for any walk below.
const MAX_PAGES: usize = 100;

fn uids(rows: &[GlossaryEntry]) -> Vec<i64> {
    rows.iter().map(|row| row.glo_uid).collect()
}

async fn walk_forward<S>(
    pager: &KeysetPager<S>,
    base: &PageRequest,
    limit: usize,
) -> Vec<GlossaryEntry>
where
    S: PageStore<Row = GlossaryEntry>,
{
    let mut seen = Vec::new();
    let mut cursor: Option<String> = None;

    for _ in 0..MAX_PAGES {
        let mut request = base.clone().with_limit(limit);
        if let Some(cursor) = cursor.take() {
            request = request.with_cursor(cursor);
        }

        let page = pager.fetch_page(&request).await.unwrap();
        assert!(page.len() <= limit);
        seen.extend(page.data.iter().cloned());

        if !page.has_next {
            return seen;
        }
        cursor = page.next_cursor.clone();
    }
    panic!("forward walk did not terminate");
}

async fn walk_backward<S>(
    pager: &KeysetPager<S>,
    base: &PageRequest,
    limit: usize,
) -> Vec<GlossaryEntry>
where
    S: PageStore<Row = GlossaryEntry>,
{
    let mut page = pager
        .fetch_page(&base.clone().with_limit(limit).with_last_page(true))
        .await
        .unwrap();
    assert!(!page.has_next);
    let mut pages = vec![page.data.clone()];

    for _ in 0..MAX_PAGES {
        if !page.has_prev {
            pages.reverse();
            return pages.concat();
        }
        let request = base
            .clone()
            .with_limit(limit)
            .with_cursor(page.prev_cursor.clone().unwrap())
            .with_direction(Direction::Prev);
        page = pager.fetch_page(&request).await.unwrap();
        assert!(page.has_next, "a prev step always has a next page");
        pages.push(page.data.clone());
    }
    panic!("backward walk did not terminate");
}

#[tokio::test]
async fn test_forward_walk_covers_listing_exactly_once() {
    setup_logger();
    let rows = glossary_rows();

    for adapter in [
        GlossaryAdapter::default(),
        GlossaryAdapter {
            discipline: Some("kimia".to_string()),
            ..Default::default()
        },
        GlossaryAdapter {
            active_only: true,
            ..Default::default()
        },
        GlossaryAdapter {
            case_insensitive: true,
            ..Default::default()
        },
    ] {
        let pager = KeysetPager::new(adapter.store(rows.clone()));
        let expected = adapter.expected(&rows);

        for limit in [1, 2, 3, 4, 7, 10, 50] {
            let seen = walk_forward(&pager, &adapter.request(), limit).await;
            assert_eq!(uids(&seen), uids(&expected), "{adapter:?} limit {limit}");

            let unique: HashSet<i64> = seen.iter().map(|row| row.glo_uid).collect();
            assert_eq!(unique.len(), seen.len());
        }
    }
}

#[tokio::test]
async fn test_forward_walk_without_totals() {
    setup_logger();
    let rows = glossary_rows();
    let adapter = GlossaryAdapter {
        active_only: true,
        ..Default::default()
    };
    let pager = KeysetPager::new(adapter.store(rows.clone()));

    let seen = walk_forward(&pager, &adapter.request().with_total(false), 4).await;
    assert_eq!(uids(&seen), uids(&adapter.expected(&rows)));
    assert_eq!(pager.store().count_queries(), 0);
}

#[tokio::test]
async fn test_backward_walk_mirrors_forward_walk() {
    setup_logger();
    let rows = glossary_rows();

    for adapter in [
        GlossaryAdapter::default(),
        GlossaryAdapter {
            discipline: Some("fisika".to_string()),
            active_only: true,
            ..Default::default()
        },
        GlossaryAdapter {
            case_insensitive: true,
            ..Default::default()
        },
    ] {
        let pager = KeysetPager::new(adapter.store(rows.clone()));
        let expected = adapter.expected(&rows);

        for limit in [1, 3, 5, 8, 30] {
            let seen = walk_backward(&pager, &adapter.request(), limit).await;
            assert_eq!(uids(&seen), uids(&expected), "{adapter:?} limit {limit}");
        }
    }
}

#[tokio::test]
async fn test_seven_active_rows() {
    setup_logger();
    // Rows 0 and 5 of the first nine are inactive.
    let rows: Vec<GlossaryEntry> = glossary_rows().into_iter().take(9).collect();
    let adapter = GlossaryAdapter {
        active_only: true,
        ..Default::default()
    };
    let expected = adapter.expected(&rows);
    assert_eq!(expected.len(), 7);

    let pager = KeysetPager::new(adapter.store(rows));
    let request = adapter.request().with_limit(2).with_total(true);

    let first = pager.fetch_page(&request).await.unwrap();
    assert_eq!(first.data, expected[0..2].to_vec());
    assert_eq!(first.total, Some(7));
    assert!(!first.has_prev);
    assert!(first.has_next);

    let second = pager
        .fetch_page(&request.clone().with_cursor(first.next_cursor.unwrap()))
        .await
        .unwrap();
    assert_eq!(second.data, expected[2..4].to_vec());
    assert!(second.has_prev);
    assert!(second.has_next);

    let last = pager
        .fetch_page(&request.clone().with_last_page(true))
        .await
        .unwrap();
    assert_eq!(last.data, expected[5..7].to_vec());
    assert!(!last.has_next);
    assert!(last.has_prev);
}

#[tokio::test]
async fn test_zero_tuple_cursor_returns_first_page() {
    setup_logger();
    let rows = glossary_rows();
    let adapter = GlossaryAdapter::default();
    let pager = KeysetPager::new(adapter.store(rows.clone()));
    let expected = adapter.expected(&rows);

    let page = pager
        .fetch_page(
            &adapter
                .request()
                .with_limit(3)
                .with_cursor(encode_cursor(&CursorPayload::new("", 0))),
        )
        .await
        .unwrap();
    assert_eq!(page.data, expected[0..3].to_vec());
    assert!(page.has_next);
}

#[tokio::test]
async fn test_empty_listing() {
    setup_logger();
    let adapter = GlossaryAdapter {
        discipline: Some("astronomi".to_string()),
        ..Default::default()
    };
    let pager = KeysetPager::new(adapter.store(glossary_rows()));

    for request in [
        adapter.request(),
        adapter.request().with_last_page(true),
        adapter
            .request()
            .with_cursor(encode_cursor(&CursorPayload::new("asam", 1)))
            .with_direction(Direction::Prev),
    ] {
        let page = pager.fetch_page(&request).await.unwrap();
        assert_eq!(page, PageResult::empty(Some(0)));
    }
    assert_eq!(pager.store().count_queries(), 3);
    assert_eq!(pager.store().data_queries(), 0);
}

#[tokio::test]
async fn test_repeated_calls_are_identical() {
    setup_logger();
    let rows = glossary_rows();
    let adapter = GlossaryAdapter::default();
    let pager = KeysetPager::new(adapter.store(rows));
    let request = adapter
        .request()
        .with_limit(4)
        .with_cursor(encode_cursor(&CursorPayload::new("atom", 951)));

    let first = pager.fetch_page(&request).await.unwrap();
    let second = pager.fetch_page(&request).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_concurrent_callers_share_a_pager() {
    setup_logger();
    let rows = glossary_rows();
    let adapter = GlossaryAdapter::default();
    let pager = Arc::new(KeysetPager::new(adapter.store(rows.clone())));
    let expected = adapter.expected(&rows);

    let mut handles = Vec::new();
    for limit in 1..=8usize {
        let pager = Arc::clone(&pager);
        let adapter = adapter.clone();
        handles.push(tokio::spawn(async move {
            walk_forward(&pager, &adapter.request(), limit).await
        }));
    }

    for handle in handles {
        let seen = handle.await.unwrap();
        assert_eq!(uids(&seen), uids(&expected));
    }
}

#[tokio::test]
async fn test_insert_before_boundary_does_not_shift_next_page() {
    setup_logger();
    let rows = glossary_rows();
    let adapter = GlossaryAdapter::default();
    let store = adapter.store(rows.clone());
    let pager = KeysetPager::new(store.clone());
    let expected = adapter.expected(&rows);

    let first = pager
        .fetch_page(&adapter.request().with_limit(5))
        .await
        .unwrap();
    assert_eq!(first.data, expected[0..5].to_vec());

    // A row that sorts before everything already served.
    store
        .insert(GlossaryEntry {
            glo_uid: 1,
            phrase: "Aaa".to_string(),
            discipline: "kimia".to_string(),
            active: true,
        })
        .await;

    let second = pager
        .fetch_page(
            &adapter
                .request()
                .with_limit(5)
                .with_cursor(first.next_cursor.unwrap()),
        )
        .await
        .unwrap();
    assert_eq!(second.data, expected[5..10].to_vec());
    assert_eq!(second.total, Some(31));
}

#[tokio::test]
async fn test_fetch_for_applies_client_params() {
    setup_logger();
    let rows = glossary_rows();
    let adapter = GlossaryAdapter {
        discipline: Some("biologi".to_string()),
        ..Default::default()
    };
    let config = PagerConfig {
        default_limit: 4,
        max_limit: 6,
        ..Default::default()
    };
    let pager = KeysetPager::with_config(adapter.store(rows.clone()), config.clone());
    let expected = adapter.expected(&rows);

    let params = RawPageParams::from_pairs([("limit", "abc")]).parse(&config);
    let page = pager.fetch_for(&adapter, params).await.unwrap();
    assert_eq!(page.data, expected[0..4].to_vec());

    let params = RawPageParams::from_pairs([("limit", "99"), ("lastPage", "true")]).parse(&config);
    let page = pager.fetch_for(&adapter, params).await.unwrap();
    assert_eq!(page.len(), 6);
    assert_eq!(page.data, expected[expected.len() - 6..].to_vec());

    let params = RawPageParams::from_pairs([
        ("limit", "2"),
        ("direction", "prev"),
        ("cursor", page.prev_cursor.as_deref().unwrap()),
    ])
    .parse(&config);
    let before = pager.fetch_for(&adapter, params).await.unwrap();
    let start = expected.len() - 8;
    assert_eq!(before.data, expected[start..start + 2].to_vec());
    assert!(before.has_next);
}

#[tokio::test]
async fn test_store_shared_behind_arc() {
    setup_logger();
    let rows = glossary_rows();
    let adapter = GlossaryAdapter::default();
    let store: Arc<MemoryStore<GlossaryEntry>> = Arc::new(adapter.store(rows.clone()));
    let pager = KeysetPager::new(Arc::clone(&store));

    let seen = walk_forward(&pager, &adapter.request(), 9).await;
    assert_eq!(seen.len(), rows.len());
    assert!(store.data_queries() >= 4);
}
