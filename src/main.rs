use oci_oke_stack::build_stack_plan;
use oci_oke_stack::config::StackConfig;
use oci_oke_stack::oci::{read_availability_domains, read_node_pool_options};
use oci_oke_stack::output::{print_plan, write_plan_file};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    log4rs::init_file("log4rs.yml", Default::default()).expect("Error initializing log4rs");
    dotenv::dotenv().ok();

    log::info!("#Start main()");

    let config = StackConfig::from_env()?;
    let options = read_node_pool_options(&config.compartment_id, None)?;
    let ads = read_availability_domains(&config.compartment_id, None)?;

    let plan = build_stack_plan(&config, &options, &ads)?;

    let plan_file = format!("{}-{}-plan.json", config.stack_name, config.component_name);
    write_plan_file(&plan, &plan_file)?;
    print_plan(&plan).await?;

    Ok(())
}
