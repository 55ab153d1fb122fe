//! Settings storage on the nRF52840's internal flash.
//!
//! The badge keeps its mesh provisioning and configuration in a
//! `sequential-storage` region at the top of application flash. The only
//! operation the badge itself performs on it is the boot-time factory
//! reset, which wipes the whole region.

use defmt::{error, info};
use embedded_storage_async::nor_flash::NorFlash;
use mesh_badge::config::{STORAGE_FLASH_PAGE_COUNT, STORAGE_FLASH_PAGE_START};
use mesh_badge::Error;

/// Flash page size for nRF52840 (4 KB).
const FLASH_PAGE_SIZE: u32 = 4096;

/// Start address of the settings region.
const STORAGE_START: u32 = STORAGE_FLASH_PAGE_START * FLASH_PAGE_SIZE;

/// End address (exclusive) of the settings region.
const STORAGE_END: u32 = (STORAGE_FLASH_PAGE_START + STORAGE_FLASH_PAGE_COUNT) * FLASH_PAGE_SIZE;

/// Erase every page of the settings region.
pub async fn erase_settings(flash: &mut impl NorFlash) -> Result<(), Error> {
    match sequential_storage::erase_all(flash, STORAGE_START..STORAGE_END).await {
        Ok(()) => {
            info!(
                "Erased {} settings pages at {:#x}",
                STORAGE_FLASH_PAGE_COUNT, STORAGE_START
            );
            Ok(())
        }
        Err(e) => {
            error!("Flash erase error: {:?}", defmt::Debug2Format(&e));
            Err(Error::Storage)
        }
    }
}
