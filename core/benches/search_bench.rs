use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use docsearch_core::{DocumentStatus, ExecutionPolicy, SearchServer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn generate_word(rng: &mut StdRng, max_length: usize) -> String {
    let length = rng.gen_range(1..=max_length);
    (0..length).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
}

fn generate_dictionary(rng: &mut StdRng, word_count: usize, max_length: usize) -> Vec<String> {
    let mut words: Vec<String> = (0..word_count).map(|_| generate_word(rng, max_length)).collect();
    words.sort();
    words.dedup();
    words
}

fn generate_query(rng: &mut StdRng, dictionary: &[String], max_word_count: usize) -> String {
    let word_count = rng.gen_range(1..=max_word_count);
    (0..word_count)
        .map(|_| dictionary[rng.gen_range(0..dictionary.len())].as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn generate_documents(rng: &mut StdRng, dictionary: &[String], document_count: usize) -> Vec<String> {
    (0..document_count).map(|_| generate_query(rng, dictionary, 100)).collect()
}

fn build_server(stop_word: &str, documents: &[String]) -> SearchServer {
    let mut server = SearchServer::with_stop_words([stop_word]).expect("valid stop word");
    for (id, text) in documents.iter().enumerate() {
        server
            .add_document(id as i32, text, DocumentStatus::Actual, &[1, 2, 3])
            .expect("generated document is valid");
    }
    server
}

fn bench_remove(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let dictionary = generate_dictionary(&mut rng, 1000, 25);
    let documents = generate_documents(&mut rng, &dictionary, 1000);

    let mut group = c.benchmark_group("remove_document");
    for (name, policy) in [("seq", ExecutionPolicy::Sequential), ("par", ExecutionPolicy::Parallel)] {
        group.bench_function(name, |b| {
            b.iter_batched(
                || build_server(&dictionary[0], &documents),
                |mut server| {
                    let ids: Vec<i32> = server.document_ids().collect();
                    for id in ids {
                        server.remove_document_with(policy, id);
                    }
                    server
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_find_top(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let dictionary = generate_dictionary(&mut rng, 1000, 10);
    let documents = generate_documents(&mut rng, &dictionary, 10_000);
    let server = build_server(&dictionary[0], &documents);
    let queries: Vec<String> = (0..100)
        .map(|_| {
            let plus = generate_query(&mut rng, &dictionary, 50);
            let minus = generate_query(&mut rng, &dictionary, 5);
            let minus: Vec<String> = minus.split(' ').map(|w| format!("-{w}")).collect();
            format!("{plus} {}", minus.join(" "))
        })
        .collect();

    let mut group = c.benchmark_group("find_top_documents");
    for (name, policy) in [("seq", ExecutionPolicy::Sequential), ("par", ExecutionPolicy::Parallel)] {
        group.bench_function(name, |b| {
            b.iter(|| {
                queries
                    .iter()
                    .map(|q| {
                        server
                            .find_top_documents_by_status_with(policy, q, DocumentStatus::Actual)
                            .map(|found| found.len())
                            .unwrap_or(0)
                    })
                    .sum::<usize>()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_remove, bench_find_top);
criterion_main!(benches);
