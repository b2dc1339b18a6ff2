use std::env;

use cereal::PortConfig;

const CONFIG: PortConfig = PortConfig {
    raw:                   true,
    input_baud:            115200,
    output_baud:           115200,
    hardware_flow_control: true,
};

fn main() {
    for arg in env::args_os().skip(1) {
        println!("configuring {:?}", arg);
        let mut port = cereal::open(&arg).unwrap();

        configure(&mut port).unwrap();
        port.close().unwrap();
    }
}

fn configure(port: &mut cereal::SystemPort) -> cereal::Result<()> {
    CONFIG.apply(port)?;

    let (input, output) = port.baud_rates()?;
    println!("input={:?} output={:?} rtscts={}", input, output, port.hardware_flow_control()?);

    Ok(())
}
