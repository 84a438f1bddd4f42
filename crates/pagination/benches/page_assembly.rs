use chrono::DateTime;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use jobboard_pagination::{PageItem, RangeQuery, assemble};

#[derive(Clone)]
struct Row {
    id: i64,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl PageItem for Row {
    fn item_id(&self) -> i64 {
        self.id
    }

    fn item_created_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.created_at
    }
}

fn window(n: i64) -> Vec<Row> {
    (0..n)
        .rev()
        .map(|i| Row {
            id: i,
            created_at: DateTime::from_timestamp_micros(i * 1_000).unwrap(),
        })
        .collect()
}

fn bench_assemble(c: &mut Criterion) {
    let rows = window(101);
    let query = RangeQuery::initial(100);

    c.bench_function("assemble_100_row_page", |b| {
        b.iter(|| {
            let page = assemble(black_box(&query), black_box(rows.clone()));
            black_box(page.has_more_history)
        })
    });

    let anchor = rows.last().unwrap().cursor_key().encode();
    c.bench_function("range_query_from_cursor", |b| {
        b.iter(|| black_box(RangeQuery::forward(Some(black_box(&anchor)), 100)))
    });
}

criterion_group!(benches, bench_assemble);
criterion_main!(benches);
