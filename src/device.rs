//! High-level MPU-6050 device driver implementation.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::completion::CompletionSignal;
use crate::config::{BusConfig, Config};
use crate::error::{Error, Result};
use crate::interface::i2c::I2cTransport;
use crate::interface::BusTransport;
use crate::registers::{
    PowerManagement1,
    Register,
    SignalPathReset,
    AXIS_BLOCK_LEN,
    EXPECTED_WHO_AM_I,
    MOTION_BLOCK_LEN,
    REG_ACCEL_XOUT_H,
    REG_GYRO_XOUT_H,
    REG_SMPLRT_DIV,
    REG_TEMP_OUT_H,
    REG_WHO_AM_I,
};
use crate::sample::{temperature_centi, AxisSample, MotionSample};
use crate::transaction::RegisterBus;

/// Per-step results of the best-effort configuration sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BringUpReport<E> {
    /// `SIGNAL_PATH_RESET` write. Some parts NACK this command.
    pub signal_path_reset: Result<(), E>,
    /// `PWR_MGMT_1` wake-up write.
    pub power_management: Result<(), E>,
    /// Block write of `SMPLRT_DIV`..`ACCEL_CONFIG`.
    pub configuration: Result<(), E>,
}

impl<E> BringUpReport<E> {
    /// Returns `true` when every step succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures() == 0
    }

    /// Number of steps that reported an error.
    pub fn failures(&self) -> usize {
        [
            self.signal_path_reset.is_err(),
            self.power_management.is_err(),
            self.configuration.is_err(),
        ]
        .into_iter()
        .filter(|failed| *failed)
        .count()
    }
}

/// High-level synchronous driver for the MPU-6050.
pub struct Mpu6050<'a, T, D> {
    bus: RegisterBus<'a, T, D>,
    config: Config,
}

impl<'a, T, D> Mpu6050<'a, T, D> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance from the provided transport.
    ///
    /// `completion` must be the signal the transport reports to.
    pub fn new(
        transport: T,
        delay: D,
        completion: &'a CompletionSignal,
        bus_config: BusConfig,
        config: Config,
    ) -> Self {
        Self {
            bus: RegisterBus::new(transport, delay, completion, bus_config),
            config,
        }
    }

    /// Consumes the driver and returns the owned transport, delay and configuration.
    pub fn release(self) -> (T, D, Config) {
        let (transport, delay) = self.bus.release();
        (transport, delay, self.config)
    }

    /// Provides mutable access to the underlying transport.
    pub fn transport_mut(&mut self) -> &mut T {
        self.bus.transport_mut()
    }

    /// Provides mutable access to the register transaction layer.
    pub fn bus_mut(&mut self) -> &mut RegisterBus<'a, T, D> {
        &mut self.bus
    }

    /// Returns a shared reference to the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl<'a, I2C, D> Mpu6050<'a, I2cTransport<'a, I2C>, D>
where
    I2C: I2c,
{
    // ==================================================================
    // == I2C Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for blocking I2C buses.
    pub fn new_i2c(
        i2c: I2C,
        delay: D,
        completion: &'a CompletionSignal,
        bus_config: BusConfig,
        config: Config,
    ) -> Self {
        Self::new(
            I2cTransport::new(i2c, completion),
            delay,
            completion,
            bus_config,
            config,
        )
    }

    /// Releases the driver, returning the I2C bus, delay and configuration.
    pub fn release_i2c(self) -> (I2C, D, Config) {
        let (transport, delay, config) = self.release();
        (transport.release(), delay, config)
    }
}

impl<T, D, E> Mpu6050<'_, T, D>
where
    T: BusTransport<Error = E>,
    D: DelayNs,
{
    // ==================================================================
    // == Initialization & Configuration ================================
    // ==================================================================
    /// Brings up the bus and configures the sensor.
    ///
    /// Only a bus bring-up failure (or an invalid configuration) is returned.
    /// Configuration writes are best-effort: their failures are logged and
    /// the sequence carries on.
    pub fn init(&mut self) -> Result<(), E> {
        info!("initializing mpu sensor");
        self.config.validate().map_err(|_| Error::InvalidConfig)?;

        if let Err(err) = self.init_bus() {
            error!("unable to initialize mpu sensor (code {=u8})", err.code());
            return Err(err);
        }

        let report = self.configure()?;
        if !report.is_clean() {
            warn!("mpu bring-up finished with {=usize} failed step(s)", report.failures());
        }
        Ok(())
    }

    /// One-time bus peripheral bring-up. Failure is fatal for the session.
    pub fn init_bus(&mut self) -> Result<(), E> {
        self.bus.init()
    }

    /// Runs the reset / wake / configure sequence and reports each step.
    ///
    /// Fails only when the bus is not up or the configuration is invalid.
    pub fn configure(&mut self) -> Result<BringUpReport<E>, E> {
        self.config.validate().map_err(|_| Error::InvalidConfig)?;
        if !self.bus.is_ready() {
            return Err(Error::NotReady);
        }

        let signal_path_reset = self
            .bus
            .write_register(SignalPathReset::ADDRESS, u8::from(SignalPathReset::all()));
        if let Err(err) = &signal_path_reset {
            warn!("mpu reset failed with code {=u8}", err.code());
        }

        let power_management = self
            .bus
            .write_register(PowerManagement1::ADDRESS, u8::from(self.config.wake_command()));
        if let Err(err) = &power_management {
            error!("mpu pwr mgmt config failed with code {=u8}", err.code());
        }

        let configuration = self
            .bus
            .write_registers(REG_SMPLRT_DIV, &self.config.register_block());
        if let Err(err) = &configuration {
            error!("mpu config write failed with code {=u8}", err.code());
        }

        Ok(BringUpReport {
            signal_path_reset,
            power_management,
            configuration,
        })
    }

    /// Writes a new configuration block and adopts it on success.
    ///
    /// Unlike [`configure`](Self::configure) this propagates the write error.
    pub fn apply_config(&mut self, config: Config) -> Result<(), E> {
        config.validate().map_err(|_| Error::InvalidConfig)?;
        self.bus
            .write_registers(REG_SMPLRT_DIV, &config.register_block())?;
        self.config = config;
        Ok(())
    }

    // ==================================================================
    // == Identification ================================================
    // ==================================================================
    /// Reads the `WHO_AM_I` register.
    pub fn who_am_i(&mut self) -> Result<u8, E> {
        let mut id = [0u8; 1];
        self.bus.read_registers(REG_WHO_AM_I, &mut id)?;
        Ok(id[0])
    }

    /// Verifies `WHO_AM_I` against the expected MPU-6050 identity.
    pub fn check_identity(&mut self) -> Result<(), E> {
        let id = self.who_am_i()?;
        if id != EXPECTED_WHO_AM_I {
            warn!("unexpected WHO_AM_I {=u8:#x}", id);
            return Err(Error::DeviceIdMismatch);
        }
        Ok(())
    }

    // ==================================================================
    // == Data Acquisition ==============================================
    // ==================================================================
    /// Reads the raw accelerometer triplet.
    ///
    /// Errors are returned unchanged and not retried; a polling caller simply
    /// skips this cycle.
    pub fn read_accel_values(&mut self) -> Result<AxisSample, E> {
        self.read_axes(REG_ACCEL_XOUT_H).inspect_err(|err| {
            error!("could not read accelerometer data (code {=u8})", err.code());
        })
    }

    /// Reads the raw gyroscope triplet.
    pub fn read_gyro_values(&mut self) -> Result<AxisSample, E> {
        self.read_axes(REG_GYRO_XOUT_H).inspect_err(|err| {
            error!("could not read gyroscope data (code {=u8})", err.code());
        })
    }

    /// Returns acceleration scaled in milli-g.
    pub fn read_accel_mg(&mut self) -> Result<[i32; 3], E> {
        let raw = self.read_accel_values()?;
        Ok(raw.to_mg(self.config.accel_range))
    }

    /// Returns angular rate scaled in milli-degrees per second.
    pub fn read_gyro_mdps(&mut self) -> Result<[i32; 3], E> {
        let raw = self.read_gyro_values()?;
        Ok(raw.to_mdps(self.config.gyro_range))
    }

    /// Reads the die temperature in hundredths of a degree Celsius.
    pub fn read_temperature_centi(&mut self) -> Result<i32, E> {
        let mut raw = [0u8; 2];
        self.bus.read_registers(REG_TEMP_OUT_H, &mut raw)?;
        Ok(temperature_centi(i16::from_be_bytes(raw)))
    }

    /// Reads accelerometer, temperature and gyroscope in one burst.
    pub fn read_motion(&mut self) -> Result<MotionSample, E> {
        let mut raw = [0u8; MOTION_BLOCK_LEN];
        self.bus.read_registers(REG_ACCEL_XOUT_H, &mut raw)?;
        Ok(MotionSample::from_be_bytes(&raw))
    }

    fn read_axes(&mut self, register: u8) -> Result<AxisSample, E> {
        let mut raw = [0u8; AXIS_BLOCK_LEN];
        self.bus.read_registers(register, &mut raw)?;
        Ok(AxisSample::from_be_bytes(&raw))
    }
}
