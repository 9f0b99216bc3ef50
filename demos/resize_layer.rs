use rust_synapse::{Init, Matrix};

fn main() -> rust_synapse::Result<()> {
    // 3 inputs -> 2 hidden units.
    let mut weights = Matrix::new(3, 2)?;
    weights.init_synapse_with_seed(0);
    println!("initial weights (3x2):\n{weights:.3}\n");

    let input = Matrix::from_rows(&[vec![1.0, 0.5, -0.5]])?;
    println!("activations: {:.3}\n", input.multiply(&weights, false)?);

    // The hidden layer is widened to 4 units.
    let wider = weights.redimension_with_seed(3, 4, Init::Synapse, 1)?;
    println!("after widening (3x4), first two columns unchanged:\n{wider:.3}\n");

    // And then shrunk to a single unit.
    let narrow = wider.redimension_zeroed(3, 1)?;
    println!("after shrinking (3x1):\n{narrow:.3}");
    Ok(())
}
