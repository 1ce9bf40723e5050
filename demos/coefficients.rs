use aliastables::{AliasTable, histogram};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let coefficients = [1.0, 1.0, 3.0, 2.0];
    let epsilon = 2f64.powi(-3) / coefficients.len() as f64;

    let table = AliasTable::new(&coefficients, epsilon)?;
    println!("mu = {}", table.mu());
    println!("keep = {:?}", table.keep());
    println!("alt = {:?}", table.alt());

    let total: f64 = coefficients.iter().sum();
    let draws = 1_000_000;
    let mut rng = rand::rng();
    let counts = histogram(&table, &mut rng, draws);

    println!("{: >5} {: >8} {: >8} {: >8}", "index", "target", "table", "drawn");
    for (i, q) in table.probabilities().into_iter().enumerate() {
        let drawn = counts[i] as f64 / draws as f64;
        println!(
            "{i: >5} {: >8.5} {q: >8.5} {drawn: >8.5}",
            coefficients[i] / total
        );
    }
    println!("max error = {:.5} (epsilon = {epsilon})", table.max_error(&coefficients)?);

    Ok(())
}
