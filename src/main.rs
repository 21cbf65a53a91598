//! camremote firmware entry point (nRF52840 + SoftDevice S140).
//!
//! Boot sequence: OLED splash, SoftDevice enable, scanner task spawn, then
//! the controller's cooperative tick loop runs forever on the main task.

#![no_std]
#![no_main]

mod ble;
mod ui;

use core::mem;

use camremote::config::{ControllerConfig, BLE_DEVICE_NAME, SPLASH_MS, TICK_INTERVAL_MS};
use camremote::traits::StatusDisplay;
use camremote::ui::status::SPLASH;
use camremote::Controller;
use defmt::{info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_nrf::gpio::Pin;
use embassy_nrf::interrupt::Priority;
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::{Instant, Timer};
use nrf_softdevice::{raw, Softdevice};
use {defmt_rtt as _, panic_probe as _};

use crate::ble::camera_client::SoftdeviceTransport;
use crate::ui::buttons::RecordButton;
use crate::ui::display::OledStatus;

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

#[embassy_executor::task]
async fn scan_task(sd: &'static Softdevice) -> ! {
    ble::scanner::scan_task(sd).await
}

fn softdevice_config() -> nrf_softdevice::Config {
    nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 64 }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 0,
            periph_role_count: 0,
            central_role_count: 1,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: BLE_DEVICE_NAME.as_ptr() as _,
            current_len: BLE_DEVICE_NAME.len() as u16,
            max_len: BLE_DEVICE_NAME.len() as u16,
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Camera controller starting...");

    // The SoftDevice owns the highest interrupt priorities.
    let mut nrf_config = embassy_nrf::config::Config::default();
    nrf_config.gpiote_interrupt_priority = Priority::P2;
    nrf_config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(nrf_config);

    // Display first, so the splash is up while the radio starts.
    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let mut display = unwrap!(OledStatus::new(i2c));
    if display.render(&SPLASH).is_err() {
        warn!("splash render failed");
    }

    let sd: &'static Softdevice = Softdevice::enable(&softdevice_config());
    unwrap!(spawner.spawn(softdevice_task(sd)));
    unwrap!(spawner.spawn(scan_task(sd)));
    info!("BLE initialized");

    Timer::after_millis(SPLASH_MS).await;

    let button = RecordButton::new(p.P0_11.degrade());
    let transport = SoftdeviceTransport::new(sd);
    let mut controller = Controller::new(ControllerConfig::default(), transport, display, button);
    controller.start(Instant::now().as_millis());

    loop {
        controller.tick(Instant::now().as_millis()).await;
        Timer::after_millis(TICK_INTERVAL_MS).await;
    }
}
