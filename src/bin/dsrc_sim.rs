//! 两车 DSRC 仿真
//!
//! 对向行驶的两辆车之间周期发送 BSM 信标，输出逐流统计。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dsrc_sim::Result;
use dsrc_sim::mobility::Vector3;
use dsrc_sim::scenario::{ScenarioConfig, SimulationDriver, SimulationReport};
use dsrc_sim::trace::JsonLinesTrace;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "dsrc_sim", about = "两车 DSRC（802.11p）链路仿真：周期信标 + 逐流统计")]
struct Args {
    /// JSON 场景配置文件；命令行参数会覆盖其中的值
    #[arg(long)]
    config: Option<PathBuf>,
    /// 两车初始距离（米）
    #[arg(long)]
    distance_m: Option<f64>,
    /// 每辆车的速度（米/秒），两车相向
    #[arg(long)]
    speed_mps: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    tx_power_dbm: Option<f64>,
    #[arg(long)]
    pkt_bytes: Option<u32>,
    /// 信标间隔（毫秒）
    #[arg(long)]
    interval_ms: Option<f64>,
    #[arg(long)]
    start_s: Option<f64>,
    /// 应用与仿真的停止时间（秒）
    #[arg(long)]
    stop_s: Option<f64>,
    #[arg(long)]
    max_packets: Option<u64>,
    /// 把每条信道通知写成 JSON Lines
    #[arg(long)]
    trace_json: Option<PathBuf>,
    /// 以 JSON 输出报告
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn build_config(args: &Args) -> Result<ScenarioConfig> {
    let mut cfg = match &args.config {
        Some(path) => ScenarioConfig::from_json_file(path)?,
        None => ScenarioConfig::default(),
    };
    if let Some(d) = args.distance_m {
        let a = cfg.nodes[0].position;
        cfg.nodes[1].position = Vector3::new(a.x + d, a.y, a.z);
    }
    if let Some(v) = args.speed_mps {
        cfg.nodes[0].velocity = Vector3::new(v, 0.0, 0.0);
        cfg.nodes[1].velocity = Vector3::new(-v, 0.0, 0.0);
    }
    if let Some(p) = args.tx_power_dbm {
        cfg.phy.tx_power_dbm = p;
    }
    if let Some(b) = args.pkt_bytes {
        cfg.pkt_bytes = b;
    }
    if let Some(ms) = args.interval_ms {
        cfg.interval_s = ms / 1000.0;
    }
    if let Some(s) = args.start_s {
        cfg.app_start_s = s;
    }
    if let Some(s) = args.stop_s {
        cfg.app_stop_s = s;
        cfg.stop_s = s;
    }
    if args.max_packets.is_some() {
        cfg.max_packets = args.max_packets;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn print_report(report: &SimulationReport) {
    println!("\n=== Simulation Results ===");
    for flow in &report.flows {
        let r = &flow.record;
        println!(
            "Flow ID: {} ({}:{} -> {}:{})",
            r.flow_id, flow.src_addr, r.key.port, flow.dst_addr, r.key.port
        );
        println!("  Tx Packets: {}", r.tx_packets);
        println!("  Rx Packets: {}", r.rx_packets);
        println!("  Lost Packets: {}", r.lost_packets);
        match flow.delivery_ratio_pct {
            Some(pdr) => println!("  Packet Delivery Ratio: {pdr}%"),
            None => println!("  Packet Delivery Ratio: n/a"),
        }
        match (flow.avg_delay_s, flow.throughput_kbps) {
            (Some(delay), Some(kbps)) => {
                println!("  Average Delay: {delay}s");
                println!("  Throughput: {kbps} kbps");
            }
            (Some(delay), None) => println!("  Average Delay: {delay}s"),
            _ => println!("  WARNING: No packets received!"),
        }
    }
    println!(
        "done @ {}, events={}",
        report.end_time, report.events_executed
    );
}

fn run(args: Args) -> Result<()> {
    let cfg = build_config(&args)?;
    let mut driver = SimulationDriver::new(cfg)?;
    if let Some(path) = &args.trace_json {
        driver.subscribe(Box::new(JsonLinesTrace::create(path)?));
        info!(path = %path.display(), "已启用 JSON 轨迹");
    }
    let report = driver.run()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn main() -> ExitCode {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "仿真失败");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
