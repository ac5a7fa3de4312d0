use anyhow::Result;
use crate::capture::fixture::*;
use crate::Error;
use super::{Features, State, Player, Summary, simulate};

const T0: f64 = 1_600_000_000.0;

fn scenario_a() -> Features {
    Features::new(steady(10, 100))
}

fn scenario_b() -> Features {
    let mut packets = steady(10, 100).packets().to_vec();
    packets.push(packet(T0 + 10.5, SERVER, HOST, 10_000));
    Features::new(capture(packets))
}

#[test]
fn deltas_start_at_zero() -> Result<()> {
    let f = Features::new(capture(vec![
        packet(T0,       SERVER, HOST, 100),
        packet(T0 + 0.5, SERVER, HOST, 100),
        packet(T0 + 2.0, HOST, SERVER, 60),
    ]));

    assert_eq!(&[0.0, 0.5, 1.5], f.deltas()?);
    assert_eq!(&[0.0, 0.5, 1.5], f.deltas()?);
    assert_eq!(&[100.0, 100.0, 60.0], f.lengths()?);
    Ok(())
}

#[test]
fn single_packet_deltas() -> Result<()> {
    let f = Features::new(steady(1, 100));
    assert_eq!(&[0.0], f.deltas()?);
    assert_eq!(Err(Error::ZeroDuration), f.download_rate_kbit_per_sec());
    Ok(())
}

#[test]
fn empty_capture_fails() {
    let f = Features::new(capture(vec![]));
    let e = Error::InsufficientData { required: 1, actual: 0 };

    assert_eq!(Err(e), f.deltas().map(<[f64]>::to_vec));
    assert!(matches!(f.lengths(), Err(Error::InsufficientData { .. })));
    assert!(matches!(f.packets_per_second(), Err(Error::InsufficientData { .. })));
    assert!(matches!(f.hosts(), Err(Error::InsufficientData { .. })));
    assert!(matches!(f.download_rate_kbit_per_sec(), Err(Error::InsufficientData { .. })));
    assert!(matches!(f.stall_report(2.0, 8.0), Err(Error::InsufficientData { .. })));
    assert!(f.stats().is_err());
}

#[test]
fn packets_per_second_is_dense() -> Result<()> {
    let f = Features::new(capture(vec![
        packet(T0,       SERVER, HOST, 100),
        packet(T0 + 0.5, SERVER, HOST, 100),
        packet(T0 + 3.2, SERVER, HOST, 100),
    ]));

    let pps = f.packets_per_second()?;
    assert_eq!(&[2.0, 0.0, 0.0, 1.0], pps);
    assert_eq!(3.0, pps.iter().sum::<f64>());
    Ok(())
}

#[test]
fn timeline_out_of_range() -> Result<()> {
    let f = Features::new(capture(vec![
        packet(0.0,      SERVER, HOST, 100),
        packet(T0,       SERVER, HOST, 100),
        packet(T0 + 1.0, SERVER, HOST, 100),
    ]));

    assert!(matches!(f.packets_per_second(), Err(Error::Decode(_))));
    assert!(matches!(f.download_per_second(), Err(Error::Decode(_))));
    assert!(matches!(f.stall_report(2.0, 8.0), Err(Error::Decode(_))));
    assert_eq!(3, f.lengths()?.len());
    Ok(())
}

#[test]
fn host_receives_most() -> Result<()> {
    let f = Features::new(capture(vec![
        packet(T0,       HOST, SERVER, 80),
        packet(T0 + 1.0, SERVER, HOST, 1400),
        packet(T0 + 2.0, SERVER, HOST, 1400),
    ]));

    assert_eq!(&[ip(HOST)],   f.hosts()?.hosts());
    assert_eq!(&[ip(SERVER)], f.partners()?);
    assert_eq!(f.hosts()?.hosts(), f.hosts()?.hosts());

    let tie = Features::new(capture(vec![
        packet(T0,       HOST, SERVER, 80),
        packet(T0 + 1.0, SERVER, HOST, 80),
    ]));
    assert_eq!(&[ip(SERVER)], tie.hosts()?.hosts());

    Ok(())
}

#[test]
fn host_pool_with_many_partners() -> Result<()> {
    let cdn = ["10.0.1.1", "10.0.1.2", "10.0.1.3"];
    let f = Features::new(capture(vec![
        packet(T0,       cdn[0], HOST, 1000),
        packet(T0 + 1.0, HOST, cdn[0], 100),
        packet(T0 + 2.0, cdn[1], HOST, 1000),
        packet(T0 + 3.0, cdn[2], HOST, 1000),
        packet(T0 + 4.0, cdn[0], HOST, 1000),
    ]));

    assert_eq!(&[ip(HOST)], f.hosts()?.hosts());
    assert_eq!(3, f.partner_count()?);
    assert_eq!(5, f.host_communications()?);
    assert_eq!(3.0, f.communication_weight(&ip(cdn[0]), false)?);
    assert_eq!(0.6, f.communication_weight(&ip(cdn[0]), true)?);
    assert_eq!(Some(&1.0), f.partner_weights()?.get(&ip(cdn[2])));
    assert_eq!(Some(&2), f.conversations()?.get(&(ip(cdn[0]), ip(HOST))));

    assert_eq!(4.0 * 8.0,  f.total_downloaded_kbit()?);
    assert_eq!(0.8,        f.total_uploaded_kbit()?);
    assert_eq!(8.0,        f.download_rate_kbit_per_sec()?);
    assert_eq!(0.2,        f.upload_rate_kbit_per_sec()?);

    Ok(())
}

#[test]
fn stray_packet_empties_host_pool() -> Result<()> {
    let f = Features::new(capture(vec![
        packet(T0,       "10.0.1.1", HOST, 1000),
        packet(T0 + 1.0, "10.0.1.2", HOST, 1000),
        packet(T0 + 2.0, "10.0.1.1", "10.0.1.2", 1000),
    ]));

    assert!(f.hosts()?.hosts().is_empty());
    assert_eq!(3, f.partner_count()?);
    assert_eq!(0.0, f.total_downloaded_kbit()?);
    Ok(())
}

#[test]
fn outlier_raises_download_rate() -> Result<()> {
    let a = scenario_a().download_rate_kbit_per_sec()?;
    let b = scenario_b().download_rate_kbit_per_sec()?;

    assert!((a - 8.0 / 9.0).abs() < 1e-12);
    assert!(b > a);
    Ok(())
}

#[test]
fn page_load_milestones() -> Result<()> {
    let f = Features::new(steady(4, 100));

    assert_eq!(1.0, f.page_load_time_quarter()?);
    assert_eq!(2.0, f.page_load_time_half()?);
    assert_eq!(3.0, f.page_load_time_three_quarters()?);
    assert_eq!(3.0, f.page_load_time_total()?);
    assert!(matches!(f.page_load_time(0.0), Err(Error::Parameter(_))));
    assert!(matches!(f.page_load_time(1.5), Err(Error::Parameter(_))));
    Ok(())
}

#[test]
fn constant_rate_never_stalls() -> Result<()> {
    let f = Features::new(steady(10, 1000));
    let report = f.stall_report(2.0, 8.0)?;

    assert_eq!(vec![4.0], report.resumes);
    assert_eq!(4.0, report.initial_delay);
    assert_eq!(0,   report.stall_count);
    assert_eq!(0.0, report.stall_time);

    assert_eq!(0, f.total_stall_count(1.0, 8.0)?);
    Ok(())
}

#[test]
fn stall_and_resume() {
    let report = simulate(&[8.0, 8.0, 0.0, 0.0, 0.0, 8.0, 8.0, 8.0], 2.0, 8.0);

    assert_eq!(vec![4.0, 9.0], report.resumes);
    assert_eq!(vec![6.0],      report.stalls);
    assert_eq!(4.0, report.initial_delay);
    assert_eq!(1,   report.stall_count);
    assert_eq!(9.0, report.stall_time);
}

#[test]
fn player_states() {
    let mut player = Player::new(1.0, 8.0);
    assert_eq!(State::Buffering, player.state());

    player.tick(1, 4.0);
    assert_eq!(State::Buffering, player.state());

    player.tick(2, 4.0);
    assert_eq!(State::Playing, player.state());
    assert_eq!(0.0, player.buffer());

    player.tick(3, 0.0);
    assert_eq!(State::Stalled, player.state());

    let report = simulate(&[1.0, 1.0], 5.0, 8.0);
    assert!(report.resumes.is_empty());
    assert_eq!(0.0, report.initial_delay);
    assert_eq!(0,   report.stall_count);
}

#[test]
fn stall_parameters() {
    let f = Features::new(steady(3, 1000));
    assert!(matches!(f.stall_report(0.0, 8.0), Err(Error::Parameter(_))));
    assert!(matches!(f.stall_report(2.0, -1.0), Err(Error::Parameter(_))));

    let single = Features::new(steady(1, 1000));
    assert_eq!(Err(Error::ZeroDuration), single.stall_report(2.0, 8.0));
}

#[test]
fn descriptive_stats() -> Result<()> {
    let f = Features::new(capture(vec![
        packet(T0,       SERVER, HOST, 100),
        packet(T0 + 1.0, SERVER, HOST, 100),
        packet(T0 + 3.0, SERVER, HOST, 200),
        packet(T0 + 4.0, SERVER, HOST, 400),
    ]));

    let stats = f.stats()?;
    assert_eq!(4,       stats.lengths.count);
    assert_eq!(200.0,   stats.lengths.mean);
    assert_eq!(150.0,   stats.lengths.median);
    assert_eq!(100.0,   stats.lengths.mode);
    assert_eq!(100.0,   stats.lengths.min);
    assert_eq!(400.0,   stats.lengths.max);
    assert_eq!(15000.0, stats.lengths.variance);
    assert!(stats.lengths.skewness > 0.0);
    assert!(stats.lengths.autocorrelation.unwrap_or(0.0) > 0.0);

    assert_eq!(1.0, stats.deltas.mode);
    assert_eq!(4.0, stats.arrival.max);
    assert_eq!(2.0, stats.arrival.median);
    Ok(())
}

#[test]
fn lag_one_autocorrelation() {
    let rising = Summary::new(&[1.0, 2.0, 3.0, 4.0]).autocorrelation;
    let swings = Summary::new(&[1.0, 3.0, 1.0, 3.0, 1.0]).autocorrelation;

    assert!((rising.unwrap_or(0.0) - 1.0).abs() < 1e-12);
    assert!((swings.unwrap_or(0.0) + 1.0).abs() < 1e-12);
    assert_eq!(None, Summary::new(&[5.0; 6]).autocorrelation);
    assert_eq!(None, Summary::new(&[1.0, 2.0]).autocorrelation);
}
