// Trains the XOR demo network.
//   cargo run                      -> 2-4-1 network, random init
//   cargo run -- path/to/net.json  -> sizes, seed and diagnostics from a NetworkConfig
use hidden_nn::{mean_absolute_error, train_epoch, Network, NetworkConfig, Result};

const EPOCHS: usize = 10_000;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading config from {}", path);
            NetworkConfig::load_json(&path)?
        }
        None => NetworkConfig::new(2, 4, 1),
    };
    let mut network = Network::from_config(&config)?;

    let inputs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];
    let targets = vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]];

    for epoch in 0..EPOCHS {
        let mae = train_epoch(&mut network, &inputs, &targets)?;
        if epoch % 1000 == 0 {
            log::info!("Epoch {epoch}: mean abs error = {mae:.6}");
        }
    }

    log::info!(
        "Final mean abs error: {:.6}",
        mean_absolute_error(&network, &inputs, &targets)?
    );
    for input in &inputs {
        println!("Input: {:?} -> Output: {:.4?}", input, network.predict(input)?.to_vec());
    }

    Ok(())
}
