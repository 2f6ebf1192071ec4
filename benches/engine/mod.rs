pub mod conditional;
pub mod match_orders;

// Import the engine benchmarks into the main bench group
pub fn register_benchmarks(c: &mut criterion::Criterion) {
    add_orders::register_benchmarks(c);
    match_orders::register_benchmarks(c);
    conditional::register_benchmarks(c);
}
