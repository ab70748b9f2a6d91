#![no_std]
#![no_main]

// pick a panicking behavior
use panic_halt as _; // you can put a breakpoint on `rust_begin_unwind` to catch panics

use cortex_m_rt::entry;
use cortex_m_semihosting::hprintln;

use stm32f7::stm32f7x7;

use serial_tx::{Transmitter, TxBackend};

// USART3 runs from PCLK1, which is HSI (16 MHz) after reset
const PCLK1_HZ: u32 = 16_000_000;
const BAUD: u32 = 115_200;

/// The two register accesses a target has to provide, here straight on the PAC.
struct RegisterUart<'a> {
    usart: &'a stm32f7x7::USART3,
}

impl TxBackend for RegisterUart<'_> {
    fn transmit_ready(&mut self) -> bool {
        self.usart.isr.read().txe().bit_is_set()
    }

    fn transmit_byte(&mut self, byte: u8) {
        self.usart.tdr.write(|w| unsafe { w.tdr().bits(byte as u16) });
    }
}

fn setup_usart3(pep: &stm32f7x7::Peripherals) {
    // enable PORT D and USART3 clocks without that there is no communication at all.
    pep.RCC.ahb1enr.modify(|_, w| w.gpioden().set_bit());
    pep.RCC.apb1enr.modify(|_, w| w.usart3en().set_bit());

    // PD8 is USART3_TX on AF7, wired to the ST-LINK virtual COM port
    pep.GPIOD.moder.modify(|_, w| w.moder8().alternate());
    pep.GPIOD.afrh.modify(|_, w| w.afrh8().af7());

    pep.USART3.brr.write(|w| unsafe { w.bits(PCLK1_HZ / BAUD) });
    pep.USART3.cr1.write(|w| w.te().set_bit().ue().set_bit());
}

fn setup_button(pep: &stm32f7x7::Peripherals) {
    pep.RCC.ahb1enr.modify(|_r, w| w.gpiocen().set_bit());
    pep.GPIOC.moder.modify(|_, w| w.moder13().input());
}

#[entry]
fn main() -> ! {
    let pep = stm32f7x7::Peripherals::take().unwrap();
    setup_usart3(&pep);
    setup_button(&pep);

    hprintln!("USART3 configured, {} baud", BAUD);

    let mut tx = Transmitter::new(RegisterUart { usart: &pep.USART3 });
    tx.send_string("bare metal counter\r\n");

    let mut counter = 0u8;

    const COUNTER: i32 = 50_000;

    loop {
        for _ in 0..COUNTER {
            // a few cycles per loop at the 16 MHz HSI reset clock
            if pep.GPIOC.idr.read().idr13().bit_is_set() {
                counter = 0;
            }
            cortex_m::asm::nop(); // No operation, just wait
        }

        // counter as 3 bit binary, decimal and raw byte
        tx.send_unsigned_ascii(counter as u32, 2, 3);
        tx.send_char(b' ');
        tx.send_signed_ascii(counter as i32 - 4, 0);
        tx.send_char(b' ');
        tx.send_byte_array(&[counter], 1);
        tx.send_string("\r\n");

        counter += 1;
        if counter > 7 {
            counter = 0;
        }
    }
}
