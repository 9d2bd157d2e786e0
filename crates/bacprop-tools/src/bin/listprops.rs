use bacprop_core::constructed::PROPERTY_CODECS;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "bacnet-listprops")]
struct Args {
    /// Print the table as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    if args.json {
        println!("{}", serde_json::to_string_pretty(PROPERTY_CODECS)?);
        return Ok(());
    }

    for codec in PROPERTY_CODECS {
        let object_type = match codec.object_type {
            Some(ot) => format!("{ot:?}"),
            None => "*".to_string(),
        };
        println!(
            "{:<48} {:<18} {:>5} {:<32} {:?} {}",
            codec.type_name,
            object_type,
            codec.property_id.to_u32(),
            codec.field_name,
            codec.shape,
            codec.kind,
        );
    }
    Ok(())
}
