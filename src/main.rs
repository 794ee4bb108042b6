//! hdaddr - derive BIP-32 address batches from an extended private key.
//!
//! Prints legacy, nested segwit, native segwit and taproot addresses
//! for the receiving and change chains of one account.

use std::{
    error::Error,
    io::{self, BufRead, Write},
    ops::Range,
    str::FromStr
};

use clap::{Parser, ValueEnum};
use log::{info, warn};

use hdaddr::{hdwallet::HARDENED_OFFSET, prelude::*};

/// Bitcoin HD address generator.
#[derive(Parser)]
#[command(name = "hdaddr", version, about)]
struct Cli {
    /// Extended private key (xprv/tprv). Read from stdin when omitted.
    #[arg(long)]
    xprv: Option<String>,

    /// Network to encode addresses for. Defaults to the network of the key.
    #[arg(short, long)]
    network: Option<Network>,

    /// Account index.
    #[arg(short, long, default_value = "0")]
    account: u32,

    /// Coin type of the derivation path.
    #[arg(long, default_value = "0")]
    coin_type: u32,

    /// First address index.
    #[arg(short, long, default_value = "0")]
    start: u32,

    /// Number of addresses per batch.
    #[arg(short, long, default_value = "20", value_parser = clap::value_parser!(u32).range(1..))]
    count: u32,

    /// Address types to print. Repeat for more than one, all types when omitted.
    #[arg(short = 't', long = "type", value_enum)]
    types: Vec<CliWalletType>,

    /// Ask for the next batch after each one.
    #[arg(short, long)]
    interactive: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliWalletType {
    Legacy,
    NestedSegwit,
    NativeSegwit,
    Taproot,
}

impl From<CliWalletType> for WalletType {
    fn from(t: CliWalletType) -> Self {
        match t {
            CliWalletType::Legacy => WalletType::P2PKH,
            CliWalletType::NestedSegwit => WalletType::P2SH_P2WPKH,
            CliWalletType::NativeSegwit => WalletType::P2WPKH,
            CliWalletType::Taproot => WalletType::P2TR,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let key = match &cli.xprv {
        Some(x) => x.trim().to_string(),
        None => prompt("Enter the HD root key (xprv): ")?,
    };
    let master = parse_master(&key)?;
    let network = select_network(&master, cli.network);
    info!("master key parsed, network: {}", network);

    let wallet = HDWallet::new(master, network)
        .with_coin_type(cli.coin_type)
        .with_account(cli.account);
    let types: Vec<WalletType> = if cli.types.is_empty() {
        WalletType::ALL.to_vec()
    } else {
        cli.types.iter().map(|t| WalletType::from(*t)).collect()
    };

    let mut start = cli.start;
    if start >= HARDENED_OFFSET {
        return Err(format!("start index must be below {}", HARDENED_OFFSET).into());
    }
    while let Some(range) = batch_range(start, cli.count) {
        println!("\n=== Addresses {} to {} ===", range.start, range.end - 1);
        print_chain(&wallet, &types, "External", EXTERNAL_CHAIN, range.clone());
        print_chain(&wallet, &types, "Internal (change)", INTERNAL_CHAIN, range.clone());

        if !cli.interactive {
            break;
        }
        if range.end >= HARDENED_OFFSET {
            info!("reached the last non hardened index");
            break;
        }
        let answer = prompt(&format!("\nGenerate the next {} addresses? (y/N): ", cli.count))?;
        if !answer.eq_ignore_ascii_case("y") {
            break;
        }
        start = range.end;
    }

    Ok(())
}

/// Indexes of the batch starting at `start`, cut at the first hardened index.
/// None once no non hardened index is left or the batch is empty.
fn batch_range(start: u32, count: u32) -> Option<Range<u32>> {
    if start >= HARDENED_OFFSET || count == 0 {
        return None;
    }
    let end = start.checked_add(count).map_or(HARDENED_OFFSET, |end| end.min(HARDENED_OFFSET));

    Some(start..end)
}

/// The network given on the command line, else the one the key was serialized for.
fn select_network(master: &Xprv, requested: Option<Network>) -> Network {
    match requested {
        Some(network) => {
            if network.params().xprv_version != master.network.params().xprv_version {
                warn!("key was serialized for {} but addresses are encoded for {}", master.network, network);
            }
            network
        }
        None => master.network,
    }
}

/// Parse the root key, giving a clear error when a public key was supplied.
fn parse_master(key: &str) -> Result<Xprv, Box<dyn Error>> {
    match Xprv::from_str(key) {
        Ok(x) => Ok(x),
        Err(HDWError::BadPrefix(_)) if Xpub::from_str(key).is_ok() => {
            Err("the given key is an extended public key, an xprv is required".into())
        }
        Err(e) => Err(format!("could not parse xprv: {e}").into()),
    }
}

fn print_chain(wallet: &HDWallet, types: &[WalletType], name: &str, chain: u32, range: Range<u32>) {
    println!("\n--- {} (chain={}) ---", name, chain);
    for wallet_type in types {
        println!("\n{}:", wallet_type);
        for entry in wallet.addresses(*wallet_type, chain, range.clone()) {
            match entry.result {
                Ok(address) => println!("  {}: {}", entry.path.index, address),
                Err(e) => warn!("{} {}: {}", wallet_type, entry.path.index, e),
            }
        }
    }
}

fn prompt(message: &str) -> io::Result<String> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    //Root key of the "abandon abandon ... about" mnemonic
    const ROOT: &str = "xprv9s21ZrQH143K3GJpoapnV8SFfukcVBSfeCficPSGfubmSFDxo1kuHnLisriDvSnRRuL2Qrg5ggqHKNVpxR86QEC8w35uxmGoggxtQTPvfUu";

    #[test]
    fn batch_ranges() {
        assert_eq!(batch_range(0, 20), Some(0..20));
        assert_eq!(batch_range(5, 1), Some(5..6));
        assert_eq!(batch_range(5, 0), None);
    }

    #[test]
    fn batch_range_stops_at_hardened_offset() {
        assert_eq!(batch_range(HARDENED_OFFSET - 2, 5), Some(HARDENED_OFFSET - 2..HARDENED_OFFSET));
        assert_eq!(batch_range(HARDENED_OFFSET - 1, u32::MAX), Some(HARDENED_OFFSET - 1..HARDENED_OFFSET));
        assert_eq!(batch_range(HARDENED_OFFSET, 5), None);
        assert_eq!(batch_range(u32::MAX - 1, 5), None);
    }

    #[test]
    fn count_must_be_positive() {
        assert!(Cli::try_parse_from(["hdaddr", "--xprv", ROOT, "--count", "0"]).is_err());
        let cli = Cli::try_parse_from(["hdaddr", "--xprv", ROOT, "--count", "3", "-t", "taproot", "-t", "legacy"]).unwrap();
        assert_eq!(cli.count, 3);
        assert_eq!(cli.types.len(), 2);
    }

    #[test]
    fn parse_master_keys() {
        assert_eq!(parse_master(ROOT).unwrap().serialize(), ROOT);

        let xpub = parse_master(ROOT).unwrap().get_xpub().serialize();
        let err = parse_master(&xpub).unwrap_err().to_string();
        assert!(err.contains("extended public key"), "{}", err);

        let err = parse_master("not an extended key").unwrap_err().to_string();
        assert!(err.starts_with("could not parse xprv"), "{}", err);
    }

    #[test]
    fn network_override() {
        let master = parse_master(ROOT).unwrap();
        assert_eq!(select_network(&master, None), Network::Bitcoin);
        assert_eq!(select_network(&master, Some(Network::Regtest)), Network::Regtest);

        let cli = Cli::try_parse_from(["hdaddr", "--xprv", ROOT, "--network", "signet"]).unwrap();
        assert_eq!(cli.network, Some(Network::Signet));
        assert!(Cli::try_parse_from(["hdaddr", "--xprv", ROOT, "--network", "litecoin"]).is_err());
    }
}
