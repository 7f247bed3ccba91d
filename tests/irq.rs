mod common;

use std::cell::RefCell;

use axp20x::{Axp20x, Error, Irq, IrqFlags, IrqSignal};
use common::{BrokenPin, FakeBus, FakeIrqPin};
use embedded_hal::i2c::ErrorKind;

const AXP202_ENABLE: [u8; 5] = [0x40, 0x41, 0x42, 0x43, 0x44];
const AXP202_STATUS: [u8; 5] = [0x48, 0x49, 0x4A, 0x4B, 0x4C];
const AXP192_ENABLE: [u8; 5] = [0x40, 0x41, 0x42, 0x43, 0x4A];
const AXP192_STATUS: [u8; 5] = [0x44, 0x45, 0x46, 0x47, 0x4D];

thread_local! {
    static CALLS: RefCell<Vec<u8>> = const { RefCell::new(Vec::new()) };
}

fn calls() -> Vec<u8> {
    CALLS.with(|c| c.borrow_mut().drain(..).collect())
}

fn record(index: u8) {
    CALLS.with(|c| c.borrow_mut().push(index));
}

fn on_vbus_plugin(_: &mut Axp20x<FakeBus>) {
    record(Irq::VbusPlugin as u8);
}

fn on_charging(_: &mut Axp20x<FakeBus>) {
    record(Irq::BatteryCharging as u8);
}

fn on_gpio0(_: &mut Axp20x<FakeBus>) {
    record(Irq::Gpio0InputEdge as u8);
}

fn on_short_press(pmic: &mut Axp20x<FakeBus>) {
    // handlers may talk to the chip
    let _ = pmic.is_vbus_present();
    record(Irq::PekShortPress as u8);
}

fn noop(_: &mut Axp20x<FakeBus>) {}

fn set_status(bus: &FakeBus, regs: [u8; 5], flags: IrqFlags) {
    for (reg, value) in regs.into_iter().zip(flags.as_bytes()) {
        bus.set_reg(reg, value);
    }
}

#[test]
fn every_index_maps_to_one_enable_bit() {
    for (bus_for, enable) in [
        (FakeBus::axp202 as fn() -> FakeBus, AXP202_ENABLE),
        (FakeBus::axp192 as fn() -> FakeBus, AXP192_ENABLE),
    ] {
        for index in 0..40u8 {
            let bus = bus_for();
            let mut pmic = Axp20x::new(bus.clone()).unwrap();
            bus.clear_writes();

            pmic.set_irq(index, Some(noop)).unwrap();
            let expected = 1u8 << (7 - index % 8);
            assert_eq!(
                bus.writes(),
                vec![(enable[(index / 8) as usize], expected)],
                "index {index}"
            );
            assert_eq!(
                pmic.read_irq_enabled().unwrap(),
                IrqFlags::new().with(index)
            );
            assert!(pmic.has_irq_handler(index));

            pmic.set_irq(index, None).unwrap();
            assert!(pmic.read_irq_enabled().unwrap().is_empty());
            assert!(!pmic.has_irq_handler(index));
        }
    }
}

#[test]
fn every_index_reads_and_clears_through_status_bank() {
    for (bus, status) in [
        (FakeBus::axp202(), AXP202_STATUS),
        (FakeBus::axp192(), AXP192_STATUS),
    ] {
        let mut pmic = Axp20x::new(bus.clone()).unwrap();
        for index in 0..40u8 {
            pmic.enable_irqs(IrqFlags::new().with(index)).unwrap();
            set_status(&bus, status, IrqFlags::new().with(index));

            let read = pmic.read_irq_status().unwrap();
            assert_eq!(read.as_u64(), 1u64 << (39 - index), "index {index}");
            assert_eq!(read.iter().collect::<Vec<_>>(), vec![index]);

            pmic.clear_irq_status().unwrap();
            for reg in status {
                assert_eq!(bus.reg(reg), 0);
            }
        }
        assert_eq!(pmic.read_irq_enabled().unwrap().as_u64(), 0xFF_FFFF_FFFF);
    }
}

#[test]
fn status_bank_reads_as_40_bit_vector() {
    let bus = FakeBus::axp202();
    let mut pmic = Axp20x::new(bus.clone()).unwrap();
    bus.set_reg(0x48, 0x80);
    bus.set_reg(0x4C, 0x01);

    let status = pmic.read_irq_status().unwrap();
    assert_eq!(status.as_u64(), 0x80_0000_0001);
    assert!(status.contains(Irq::AcinOverVoltage));
    assert!(status.contains(Irq::Gpio0InputEdge));
    assert_eq!(pmic.last_irq_status(), status);
}

#[test]
fn dispatch_calls_registered_handlers_in_index_order() {
    let bus = FakeBus::axp202();
    let mut pmic = Axp20x::new(bus.clone()).unwrap();
    pmic.set_irq(Irq::Gpio0InputEdge, Some(on_gpio0)).unwrap();
    pmic.set_irq(Irq::BatteryCharging, Some(on_charging)).unwrap();
    pmic.set_irq(Irq::VbusPlugin, Some(on_vbus_plugin)).unwrap();
    pmic.set_irq(Irq::PekShortPress, Some(on_short_press))
        .unwrap();

    // DieTempHigh is pending without a handler
    let pending = IrqFlags::new()
        .with(Irq::Gpio0InputEdge)
        .with(Irq::DieTempHigh)
        .with(Irq::VbusPlugin)
        .with(Irq::BatteryCharging);
    set_status(&bus, AXP202_STATUS, pending);

    let handled = pmic.dispatch_irq().unwrap();
    assert_eq!(handled, pending);
    assert_eq!(calls(), vec![4, 12, 39]);

    for reg in AXP202_STATUS {
        assert_eq!(bus.reg(reg), 0);
    }
    assert!(pmic.last_irq_status().is_empty());
}

#[test]
fn dispatch_clears_status_without_handlers() {
    let bus = FakeBus::axp202();
    let mut pmic = Axp20x::new(bus.clone()).unwrap();
    set_status(&bus, AXP202_STATUS, IrqFlags::from_u64(0xFF_FFFF_FFFF));
    bus.clear_writes();

    pmic.dispatch_irq().unwrap();
    assert!(calls().is_empty());
    let cleared: Vec<u8> = bus
        .writes()
        .into_iter()
        .filter(|&(_, value)| value == 0xFF)
        .map(|(reg, _)| reg)
        .collect();
    assert_eq!(cleared, AXP202_STATUS.to_vec());
    assert!(pmic.read_irq_status().unwrap().is_empty());
}

#[test]
fn handler_can_use_the_driver() {
    let bus = FakeBus::axp202();
    let mut pmic = Axp20x::new(bus.clone()).unwrap();
    pmic.set_irq(Irq::PekShortPress, Some(on_short_press))
        .unwrap();
    set_status(
        &bus,
        AXP202_STATUS,
        IrqFlags::new().with(Irq::PekShortPress),
    );

    pmic.dispatch_irq().unwrap();
    assert_eq!(calls(), vec![Irq::PekShortPress as u8]);
}

#[test]
fn removed_handler_is_not_called() {
    let bus = FakeBus::axp202();
    let mut pmic = Axp20x::new(bus.clone()).unwrap();
    pmic.set_irq(Irq::VbusPlugin, Some(on_vbus_plugin)).unwrap();
    pmic.set_irq(Irq::VbusPlugin, None).unwrap();

    set_status(&bus, AXP202_STATUS, IrqFlags::new().with(Irq::VbusPlugin));
    let handled = pmic.dispatch_irq().unwrap();
    assert!(handled.contains(Irq::VbusPlugin));
    assert!(calls().is_empty());
}

#[test]
fn out_of_range_index_is_ignored() {
    let bus = FakeBus::axp202();
    let mut pmic = Axp20x::new(bus.clone()).unwrap();
    bus.clear_writes();

    pmic.set_irq(40u8, Some(noop)).unwrap();
    pmic.set_irq(255u8, None).unwrap();
    assert!(bus.writes().is_empty());
    assert!(!pmic.has_irq_handler(40u8));
}

#[test]
fn bulk_enable_touches_only_selected_registers() {
    let bus = FakeBus::axp202();
    let mut pmic = Axp20x::new(bus.clone()).unwrap();
    bus.set_reg(0x42, 0x5A);
    bus.clear_writes();

    let irqs = IrqFlags::new()
        .with(Irq::AcinPlugin)
        .with(Irq::Gpio1InputEdge);
    pmic.enable_irqs(irqs).unwrap();
    assert_eq!(bus.writes(), vec![(0x40, 0x40), (0x44, 0x02)]);
    assert!(!pmic.has_irq_handler(Irq::AcinPlugin));
    assert_eq!(bus.reg(0x42), 0x5A);

    pmic.disable_irqs(IrqFlags::new().with(Irq::AcinPlugin))
        .unwrap();
    assert_eq!(bus.reg(0x40), 0);
    assert_eq!(bus.reg(0x44), 0x02);
}

#[test]
fn axp192_uses_split_irq_banks() {
    let bus = FakeBus::axp192();
    let mut pmic = Axp20x::new(bus.clone()).unwrap();
    pmic.set_irq(Irq::Gpio0InputEdge, Some(on_gpio0)).unwrap();
    assert_eq!(bus.reg(0x4A), 0x01);

    bus.set_reg(0x4D, 0x01);
    bus.set_reg(0x44, 0x08);
    bus.clear_writes();

    let handled = pmic.dispatch_irq().unwrap();
    assert!(handled.contains(Irq::VbusPlugin));
    assert_eq!(calls(), vec![39]);

    let cleared: Vec<u8> = bus.writes().into_iter().map(|(reg, _)| reg).collect();
    assert_eq!(cleared, AXP192_STATUS.to_vec());
    assert_eq!(bus.reg(0x4D), 0);
}

#[test]
fn service_irq_runs_only_when_signalled() {
    let bus = FakeBus::axp202();
    let mut pmic = Axp20x::new(bus.clone()).unwrap();
    pmic.set_irq(Irq::VbusPlugin, Some(on_vbus_plugin)).unwrap();
    set_status(&bus, AXP202_STATUS, IrqFlags::new().with(Irq::VbusPlugin));
    bus.clear_writes();

    let signal = IrqSignal::new();
    assert_eq!(pmic.service_irq(&signal).unwrap(), None);
    assert!(bus.writes().is_empty());

    // two edges before servicing coalesce into one pass
    signal.on_falling_edge();
    signal.on_falling_edge();
    let handled = pmic.service_irq(&signal).unwrap();
    assert_eq!(handled, Some(IrqFlags::new().with(Irq::VbusPlugin)));
    assert_eq!(calls(), vec![4]);
    assert_eq!(pmic.service_irq(&signal).unwrap(), None);
}

#[test]
fn arming_catches_an_already_asserted_line() {
    let signal = IrqSignal::new();
    assert!(!signal.arm(&mut FakeIrqPin { low: false }).unwrap());
    assert!(!signal.is_pending());

    assert!(signal.arm(&mut FakeIrqPin { low: true }).unwrap());
    assert!(signal.is_pending());

    assert!(signal.arm(&mut BrokenPin).is_err());
}

#[test]
fn set_irq_bus_error_leaves_handler_table_alone() {
    let bus = FakeBus::axp202();
    let mut pmic = Axp20x::new(bus.clone()).unwrap();
    pmic.set_irq(Irq::VbusPlugin, Some(on_vbus_plugin)).unwrap();
    bus.clear_writes();

    bus.fail_transaction(0);
    assert_eq!(
        pmic.set_irq(Irq::BatteryCharging, Some(on_charging)),
        Err(Error::I2c(ErrorKind::Bus))
    );
    assert!(!pmic.has_irq_handler(Irq::BatteryCharging));

    // a failed write of the enable register must not drop the old handler
    bus.fail_transaction(1);
    assert_eq!(
        pmic.set_irq(Irq::VbusPlugin, None),
        Err(Error::I2c(ErrorKind::Bus))
    );
    assert!(pmic.has_irq_handler(Irq::VbusPlugin));
    assert!(bus.writes().is_empty());
    assert_eq!(bus.reg(0x40), 0x08);
}

#[test]
fn dispatch_bus_error_calls_no_handler() {
    let bus = FakeBus::axp202();
    let mut pmic = Axp20x::new(bus.clone()).unwrap();
    pmic.set_irq(Irq::VbusPlugin, Some(on_vbus_plugin)).unwrap();
    set_status(&bus, AXP202_STATUS, IrqFlags::new().with(Irq::VbusPlugin));
    bus.clear_writes();

    bus.fail_transaction(0);
    assert_eq!(pmic.dispatch_irq(), Err(Error::I2c(ErrorKind::Bus)));
    assert!(calls().is_empty());
    assert!(bus.writes().is_empty());
    assert_eq!(bus.reg(0x48), 0x08);
}

#[test]
fn service_irq_retries_after_bus_error() {
    let bus = FakeBus::axp202();
    let mut pmic = Axp20x::new(bus.clone()).unwrap();
    pmic.set_irq(Irq::VbusPlugin, Some(on_vbus_plugin)).unwrap();
    set_status(&bus, AXP202_STATUS, IrqFlags::new().with(Irq::VbusPlugin));

    let signal = IrqSignal::new();
    signal.on_falling_edge();
    bus.fail_transaction(0);
    assert_eq!(
        pmic.service_irq(&signal),
        Err(Error::I2c(ErrorKind::Bus))
    );
    assert!(signal.is_pending());
    assert_eq!(bus.reg(0x48), 0x08);
    assert!(calls().is_empty());

    let handled = pmic.service_irq(&signal).unwrap();
    assert_eq!(handled, Some(IrqFlags::new().with(Irq::VbusPlugin)));
    assert_eq!(calls(), vec![4]);
    assert_eq!(bus.reg(0x48), 0);
    assert!(!signal.is_pending());
}

#[test]
fn service_irq_retries_when_clearing_fails() {
    let bus = FakeBus::axp202();
    let mut pmic = Axp20x::new(bus.clone()).unwrap();
    pmic.set_irq(Irq::VbusPlugin, Some(on_vbus_plugin)).unwrap();
    set_status(&bus, AXP202_STATUS, IrqFlags::new().with(Irq::VbusPlugin));

    let signal = IrqSignal::new();
    signal.on_falling_edge();
    // burst status read succeeds, the first clear write fails
    bus.fail_transaction(1);
    assert!(pmic.service_irq(&signal).is_err());
    assert!(signal.is_pending());
    assert_eq!(bus.reg(0x48), 0x08);

    pmic.service_irq(&signal).unwrap();
    assert_eq!(calls(), vec![4, 4]);
    assert_eq!(bus.reg(0x48), 0);
}
