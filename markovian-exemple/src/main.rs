use std::time::Instant;

use log::info;
use markovian_core::render::{frequency_series, marginal_series};
use markovian_core::{IntoMarkovChain, Renderer};

mod text_renderer;

use text_renderer::TextRenderer;

const LOREM: &str = "lorem ipsum dolor sit amet, consectetur adipiscing elit. aliquam tempus nisi eu nisl gravida, in pretium tellus cursus. duis facilisis malesuada ligula et interdum. donec ac libero et dui tempus bibendum. donec porttitor mollis accumsan. sed urna turpis, consectetur sit amet gravida vitae, pellentesque in libero. quisque erat lorem, tincidunt eu vestibulum eu, dapibus nec felis. ut eu purus tortor. nulla eros leo, porttitor vel elit eget, tempor blandit metus. proin congue lobortis pretium. nulla eget pellentesque risus. nam ultrices quis tellus ut tincidunt. morbi vestibulum ipsum eu elementum scelerisque. fusce aliquam lobortis urna vel rhoncus. duis ut rhoncus purus, id auctor odio. donec lobortis ac enim in placerat. donec placerat nec lectus a bibendum.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
	// RUST_LOG=markovian_core=debug shows the counting plan
	env_logger::init();

	// Learn from the file given as first argument, or from the built-in paragraph
	let corpus = match std::env::args().nth(1) {
		Some(path) => std::fs::read_to_string(path)?,
		None => LOREM.to_owned(),
	};

	let total = Instant::now();
	let chain = corpus.chars().to_markov_chain();
	info!("learned {} symbols in {:?}", chain.size(), total.elapsed());

	// One endless walk, cut at 100 symbols
	let sampling = Instant::now();
	let sample: String = chain.sample(rand::rng())?.take(100).collect();
	println!("Sample: {sample}");
	println!("Ergodic: {}", chain.is_ergodic()?);
	println!("Sampling time: {} ms", sampling.elapsed().as_millis());

	// Compare the learned marginal with the symbol frequencies of a few
	// independent walks generated in parallel
	let matrix = chain.transition_matrix()?;
	let batch = chain.sample_batch(3, 2_000, 42)?;

	let mut series = vec![marginal_series("learned", &matrix)];
	for (i, walk) in batch.iter().enumerate() {
		series.push(frequency_series(&format!("walk {i}"), matrix.alphabet(), walk));
	}

	let labels = matrix.alphabet().iter().map(char::to_string).collect();
	let chart = TextRenderer::new(labels, 40).render(&series, "Symbol frequencies")?;
	println!("{}", String::from_utf8_lossy(&chart));

	println!("Total time: {} ms", total.elapsed().as_millis());
	Ok(())
}
