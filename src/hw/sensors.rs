//! On-board sensors over the second I²C bus.
//!
//! - HDC1010 temperature / humidity at 0x43
//! - MMA8652 three-axis accelerometer at 0x1D
//! - APDS9960 ambient light / proximity at 0x39
//!
//! Each sample is a short blocking register transaction; a failing chip is
//! reported as the matching [`SensorError`] and the other readings are
//! unaffected.

use defmt::{info, warn};
use embassy_time::{block_for, Duration};
use embedded_hal::i2c::I2c;
use mesh_badge::hal::{Environment, Motion, Proximity, Sensors};
use mesh_badge::{Error, SensorError};

const HDC1010_ADDR: u8 = 0x43;
const HDC1010_REG_TEMPERATURE: u8 = 0x00;
const HDC1010_REG_CONFIG: u8 = 0x02;
/// Acquire temperature and humidity in one sequence, 14-bit each.
const HDC1010_CONFIG_SEQUENCE: u16 = 0x1000;
const HDC1010_CONVERSION: Duration = Duration::from_millis(15);

const MMA8652_ADDR: u8 = 0x1D;
const MMA8652_REG_OUT_X_MSB: u8 = 0x01;
const MMA8652_REG_XYZ_DATA_CFG: u8 = 0x0E;
const MMA8652_REG_CTRL1: u8 = 0x2A;
const MMA8652_CTRL1_ACTIVE: u8 = 0x01;
/// Counts per g at the ±2 g range (12-bit, left-justified).
const MMA8652_COUNTS_PER_G: f32 = 1024.0;
const STANDARD_GRAVITY: f32 = 9.806_65;

const APDS9960_ADDR: u8 = 0x39;
const APDS9960_REG_ENABLE: u8 = 0x80;
const APDS9960_REG_CDATAL: u8 = 0x94;
const APDS9960_REG_PDATA: u8 = 0x9C;
/// Power on, ambient light and proximity engines enabled.
const APDS9960_ENABLE_PON_AEN_PEN: u8 = 0x07;

pub struct SensorBus<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> SensorBus<I2C> {
    /// Send `bytes` to `addr`. EasyDMA only reads from RAM, so constant
    /// commands are staged on the stack first.
    fn command(&mut self, addr: u8, bytes: &[u8]) -> Result<(), I2C::Error> {
        let mut staged = [0u8; 3];
        let staged = &mut staged[..bytes.len()];
        staged.copy_from_slice(bytes);
        self.i2c.write(addr, staged)
    }

    fn read_register(&mut self, addr: u8, reg: u8, buf: &mut [u8]) -> Result<(), I2C::Error> {
        let staged = [reg];
        self.i2c.write_read(addr, &staged, buf)
    }

    /// Configure all three chips. A chip that does not answer is logged and
    /// left to fail its samples later.
    pub fn new(i2c: I2C) -> Self {
        let mut bus = Self { i2c };

        let [hi, lo] = HDC1010_CONFIG_SEQUENCE.to_be_bytes();
        if bus.command(HDC1010_ADDR, &[HDC1010_REG_CONFIG, hi, lo]).is_err() {
            warn!("HDC1010 not found");
        }
        if bus.command(MMA8652_ADDR, &[MMA8652_REG_XYZ_DATA_CFG, 0x00]).is_err()
            || bus.command(MMA8652_ADDR, &[MMA8652_REG_CTRL1, MMA8652_CTRL1_ACTIVE]).is_err()
        {
            warn!("MMA8652 not found");
        }
        if bus
            .command(APDS9960_ADDR, &[APDS9960_REG_ENABLE, APDS9960_ENABLE_PON_AEN_PEN])
            .is_err()
        {
            warn!("APDS9960 not found");
        }

        info!("Sensors configured");
        bus
    }
}

fn axis(msb: u8, lsb: u8) -> f32 {
    let counts = i16::from_be_bytes([msb, lsb]) >> 4;
    counts as f32 / MMA8652_COUNTS_PER_G * STANDARD_GRAVITY
}

impl<I2C: I2c> Sensors for SensorBus<I2C> {
    fn sample_environment(&mut self) -> Result<Environment, Error> {
        self.command(HDC1010_ADDR, &[HDC1010_REG_TEMPERATURE])
            .map_err(|_| SensorError::Environment)?;
        block_for(HDC1010_CONVERSION);

        let mut raw = [0u8; 4];
        self.i2c
            .read(HDC1010_ADDR, &mut raw)
            .map_err(|_| SensorError::Environment)?;

        let temperature = u16::from_be_bytes([raw[0], raw[1]]) as f32;
        let humidity = u16::from_be_bytes([raw[2], raw[3]]) as f32;
        Ok(Environment {
            temperature: temperature * 165.0 / 65536.0 - 40.0,
            humidity: humidity * 100.0 / 65536.0,
        })
    }

    fn sample_motion(&mut self) -> Result<Motion, Error> {
        let mut raw = [0u8; 6];
        self.read_register(MMA8652_ADDR, MMA8652_REG_OUT_X_MSB, &mut raw)
            .map_err(|_| SensorError::Motion)?;

        Ok(Motion {
            x: axis(raw[0], raw[1]),
            y: axis(raw[2], raw[3]),
            z: axis(raw[4], raw[5]),
        })
    }

    fn sample_proximity(&mut self) -> Result<Proximity, Error> {
        let mut light = [0u8; 2];
        self.read_register(APDS9960_ADDR, APDS9960_REG_CDATAL, &mut light)
            .map_err(|_| SensorError::Proximity)?;

        let mut proximity = [0u8; 1];
        self.read_register(APDS9960_ADDR, APDS9960_REG_PDATA, &mut proximity)
            .map_err(|_| SensorError::Proximity)?;

        Ok(Proximity {
            light: u16::from_le_bytes(light),
            proximity: proximity[0],
        })
    }
}
